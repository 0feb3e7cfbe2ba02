//! Property-based tests for reimbursement repository helpers.

use proptest::prelude::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

use claimdesk_core::audit::AuditAction;
use claimdesk_core::claim::{Category, ClaimError, ClaimStatus};
use claimdesk_core::org::{Role, UserView};

use crate::entities::reimbursements;
use crate::entities::sea_orm_active_enums::{ReimbursementCategory, ReimbursementStatus};
use crate::repositories::reimbursement::{
    authorize_decision, core_category_to_db, core_status_to_db, db_category_to_core,
    db_status_to_core, decision_action, merge_subordinate_ids, status_counts,
};

/// Creates a claim row with the given status.
fn claim(status: ReimbursementStatus) -> reimbursements::Model {
    let now = chrono::Utc::now();
    reimbursements::Model {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        approver_id: Some(Uuid::new_v4()),
        category: ReimbursementCategory::Travel,
        amount: dec!(120.50),
        description: "Client visit".to_string(),
        expense_date: now.date_naive(),
        document_ref: None,
        status,
        manager_comments: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn status_strategy() -> impl Strategy<Value = ReimbursementStatus> {
    prop_oneof![
        Just(ReimbursementStatus::Pending),
        Just(ReimbursementStatus::Approved),
        Just(ReimbursementStatus::Declined),
    ]
}

fn core_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Declined),
    ]
}

fn id_strategy() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>().prop_map(Uuid::from_bytes)
}

fn id_vec_strategy() -> impl Strategy<Value = Vec<Uuid>> {
    proptest::collection::vec(id_strategy(), 0..10)
}

fn view(id: Uuid, role: Role) -> UserView {
    UserView {
        id,
        role,
        department_id: None,
        manager_id: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Status counts always partition the claim list.
    #[test]
    fn prop_status_counts_partition(statuses in proptest::collection::vec(status_strategy(), 0..50)) {
        let claims: Vec<_> = statuses.into_iter().map(claim).collect();
        let counts = status_counts(&claims);

        prop_assert_eq!(counts.total, claims.len() as u64);
        prop_assert_eq!(counts.pending + counts.approved + counts.declined, counts.total);
    }

    /// Status conversion round-trips between database and core.
    #[test]
    fn prop_status_round_trip(status in status_strategy()) {
        prop_assert_eq!(core_status_to_db(db_status_to_core(&status)), status);
    }

    /// The merged visibility set contains every direct report, every
    /// unmanaged department member, and the manager, with no duplicates.
    #[test]
    fn prop_merged_ids_cover_all_inputs(
        direct in id_vec_strategy(),
        orphans in id_vec_strategy(),
        manager_id in id_strategy(),
    ) {
        let merged = merge_subordinate_ids(direct.clone(), orphans.clone(), manager_id);

        prop_assert!(merged.contains(&manager_id));
        for id in direct.iter().chain(orphans.iter()) {
            prop_assert!(merged.contains(id));
        }
        for window in merged.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
    }

    /// An unauthorized actor never obtains a decision, whatever the claim's
    /// current status. The decision path runs this check before any
    /// transaction is opened, so the claim stays untouched.
    #[test]
    fn prop_unauthorized_actor_gets_no_decision(
        current in core_status_strategy(),
        actor_id in id_strategy(),
        employee_id in id_strategy(),
    ) {
        let actor = view(actor_id, Role::Employee);
        let employee = view(employee_id, Role::Employee);

        let result = authorize_decision(
            &actor,
            &employee,
            None,
            current,
            ClaimStatus::Approved,
            None,
        );
        prop_assert!(matches!(result, Err(ClaimError::Policy(_))));
    }
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_category_conversion_round_trip() {
        for category in Category::ALL {
            assert_eq!(db_category_to_core(&core_category_to_db(category)), category);
        }
    }

    #[test]
    fn test_status_counts_by_bucket() {
        let claims = vec![
            claim(ReimbursementStatus::Pending),
            claim(ReimbursementStatus::Pending),
            claim(ReimbursementStatus::Approved),
            claim(ReimbursementStatus::Declined),
        ];
        let counts = status_counts(&claims);

        assert_eq!(counts.total, 4);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.declined, 1);
    }

    #[test]
    fn test_decision_maps_to_matching_action() {
        assert_eq!(decision_action(ClaimStatus::Approved), AuditAction::Approved);
        assert_eq!(decision_action(ClaimStatus::Declined), AuditAction::Declined);
    }
}
