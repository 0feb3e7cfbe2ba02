//! Property-based tests for the claim workflow state machine.

use proptest::prelude::*;
use uuid::Uuid;

use crate::claim::error::ClaimError;
use crate::claim::types::ClaimStatus;
use crate::claim::workflow::ClaimWorkflow;

/// Strategy for generating random claim statuses.
fn arb_status() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Declined),
    ]
}

/// Strategy for generating user IDs.
fn arb_user_id() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>().prop_map(Uuid::from_bytes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Decisions only succeed from Pending; both terminal states reject them.
    #[test]
    fn prop_decisions_only_from_pending(status in arb_status(), user in arb_user_id()) {
        let approve = ClaimWorkflow::approve(status, user, None);
        let decline = ClaimWorkflow::decline(status, user, None);

        if status == ClaimStatus::Pending {
            prop_assert!(approve.is_ok());
            prop_assert!(decline.is_ok());
        } else {
            prop_assert!(
                matches!(approve, Err(ClaimError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                approve
            );
            prop_assert!(
                matches!(decline, Err(ClaimError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                decline
            );
        }
    }

    /// A successful decision always lands in a terminal status and
    /// preserves the actor and comments.
    #[test]
    fn prop_decision_is_terminal(user in arb_user_id(), comments in proptest::option::of("[a-z ]{0,40}")) {
        let decision = ClaimWorkflow::approve(ClaimStatus::Pending, user, comments.clone()).unwrap();
        prop_assert!(decision.new_status.is_terminal());
        prop_assert_eq!(decision.decided_by, user);
        prop_assert_eq!(decision.comments, comments);
    }

    /// No transition in the table leads out of a terminal status.
    #[test]
    fn prop_no_exit_from_terminal(from in arb_status(), to in arb_status()) {
        if from.is_terminal() {
            prop_assert!(!ClaimWorkflow::is_valid_transition(from, to));
        }
    }
}
