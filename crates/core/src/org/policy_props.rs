//! Property-based tests for the authorization policy.

use proptest::prelude::*;
use uuid::Uuid;

use crate::org::policy::{UserView, Visibility, admin_only, can_decide, can_view, visibility_scope};
use crate::org::role::Role;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Employee), Just(Role::Manager), Just(Role::Admin)]
}

fn arb_id() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>().prop_map(Uuid::from_bytes)
}

fn arb_user() -> impl Strategy<Value = UserView> {
    (
        arb_id(),
        arb_role(),
        proptest::option::of(arb_id()),
        proptest::option::of(arb_id()),
    )
        .prop_map(|(id, role, department_id, manager_id)| UserView {
            id,
            role,
            department_id,
            manager_id,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The admin may decide and view every claim.
    #[test]
    fn prop_admin_passes_every_check(mut actor in arb_user(), employee in arb_user()) {
        actor.role = Role::Admin;
        prop_assert!(can_decide(&actor, &employee, None).is_ok());
        prop_assert!(can_view(&actor, &employee, None).is_ok());
        prop_assert!(admin_only(&actor).is_ok());
    }

    /// Whoever may decide a claim may also view it.
    #[test]
    fn prop_decide_implies_view(
        actor in arb_user(),
        employee in arb_user(),
        dept_manager in proptest::option::of(arb_id()),
    ) {
        if can_decide(&actor, &employee, dept_manager).is_ok() {
            prop_assert!(can_view(&actor, &employee, dept_manager).is_ok());
        }
    }

    /// An employee never passes a decide check, regardless of relations.
    #[test]
    fn prop_employee_never_decides(
        mut actor in arb_user(),
        mut employee in arb_user(),
    ) {
        actor.role = Role::Employee;
        // Even a direct-report relation does not grant decide rights.
        employee.manager_id = Some(actor.id);
        employee.department_id = actor.department_id;
        prop_assert!(can_decide(&actor, &employee, None).is_err());
    }

    /// Visibility scope is a total function of the role.
    #[test]
    fn prop_visibility_matches_role(actor in arb_user()) {
        let scope = visibility_scope(&actor);
        match actor.role {
            Role::Admin => prop_assert_eq!(scope, Visibility::All),
            Role::Manager => prop_assert_eq!(scope, Visibility::Subordinates(actor.id)),
            Role::Employee => prop_assert_eq!(scope, Visibility::Own(actor.id)),
        }
    }
}
