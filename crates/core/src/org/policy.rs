//! Centralized authorization predicates.
//!
//! Every role- or relationship-based check in the portal goes through
//! this module. Handlers and repositories never inspect role flags
//! directly; they call a predicate and act on its verdict.

use uuid::Uuid;

use crate::org::error::PolicyError;
use crate::org::role::Role;

/// Minimal view of a user for authorization decisions.
///
/// Carries only the fields the policy needs, so both entity models and
/// test fixtures can produce one cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserView {
    /// The user's ID.
    pub id: Uuid,
    /// The user's role.
    pub role: Role,
    /// The user's department, if any.
    pub department_id: Option<Uuid>,
    /// The user's direct manager, if any.
    pub manager_id: Option<Uuid>,
}

/// Which claims an actor may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// All claims in the portal (admin).
    All,
    /// Claims of the direct subordinates of the given manager.
    Subordinates(Uuid),
    /// Only the actor's own claims.
    Own(Uuid),
}

/// Determines the listing scope for an actor.
#[must_use]
pub fn visibility_scope(actor: &UserView) -> Visibility {
    match actor.role {
        Role::Admin => Visibility::All,
        Role::Manager => Visibility::Subordinates(actor.id),
        Role::Employee => Visibility::Own(actor.id),
    }
}

/// Checks whether `actor` may approve or decline a claim owned by `employee`.
///
/// Permitted when:
/// - the actor is the global admin, or
/// - the actor is the employee's direct manager and shares the employee's
///   department, or
/// - the employee has no manager and the actor manages the employee's
///   department (`department_manager` is the manager of that department).
///
/// # Errors
/// Returns `PolicyError::NotAuthorized` when none of the rules match.
pub fn can_decide(
    actor: &UserView,
    employee: &UserView,
    department_manager: Option<Uuid>,
) -> Result<(), PolicyError> {
    if actor.role.is_admin() {
        return Ok(());
    }

    if actor.role.is_manager()
        && employee.manager_id == Some(actor.id)
        && employee.department_id == actor.department_id
    {
        return Ok(());
    }

    // Fallback accountable party for employees without a manager.
    if employee.manager_id.is_none() && department_manager == Some(actor.id) {
        return Ok(());
    }

    Err(PolicyError::NotAuthorized)
}

/// Checks whether `actor` may view the detail of a claim owned by `employee`.
///
/// Permitted for the admin, the employee themself, the employee's direct
/// manager, or the employee's department manager when no direct manager
/// is assigned.
///
/// # Errors
/// Returns `PolicyError::NotAuthorized` when none of the rules match.
pub fn can_view(
    actor: &UserView,
    employee: &UserView,
    department_manager: Option<Uuid>,
) -> Result<(), PolicyError> {
    if actor.role.is_admin() || actor.id == employee.id || employee.manager_id == Some(actor.id) {
        return Ok(());
    }

    if employee.manager_id.is_none() && department_manager == Some(actor.id) {
        return Ok(());
    }

    Err(PolicyError::NotAuthorized)
}

/// Checks that the actor is the global admin.
///
/// Gates department/employee management, manager assignment, and
/// promotion to manager.
///
/// # Errors
/// Returns `PolicyError::NotAuthorized` for any non-admin actor.
pub fn admin_only(actor: &UserView) -> Result<(), PolicyError> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(PolicyError::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserView {
        UserView {
            id: Uuid::new_v4(),
            role,
            department_id: None,
            manager_id: None,
        }
    }

    #[test]
    fn test_admin_can_decide_anything() {
        let admin = user(Role::Admin);
        let employee = user(Role::Employee);
        assert!(can_decide(&admin, &employee, None).is_ok());
    }

    #[test]
    fn test_direct_manager_same_department_can_decide() {
        let dept = Uuid::new_v4();
        let mut manager = user(Role::Manager);
        manager.department_id = Some(dept);
        let mut employee = user(Role::Employee);
        employee.department_id = Some(dept);
        employee.manager_id = Some(manager.id);

        assert!(can_decide(&manager, &employee, None).is_ok());
    }

    #[test]
    fn test_direct_manager_other_department_cannot_decide() {
        let mut manager = user(Role::Manager);
        manager.department_id = Some(Uuid::new_v4());
        let mut employee = user(Role::Employee);
        employee.department_id = Some(Uuid::new_v4());
        employee.manager_id = Some(manager.id);

        assert_eq!(
            can_decide(&manager, &employee, None),
            Err(PolicyError::NotAuthorized)
        );
    }

    #[test]
    fn test_unrelated_manager_cannot_decide() {
        let manager = user(Role::Manager);
        let mut employee = user(Role::Employee);
        employee.manager_id = Some(Uuid::new_v4());

        assert_eq!(
            can_decide(&manager, &employee, None),
            Err(PolicyError::NotAuthorized)
        );
    }

    #[test]
    fn test_department_manager_fallback_when_no_manager() {
        let dept_manager = user(Role::Manager);
        let employee = user(Role::Employee);

        assert!(can_decide(&dept_manager, &employee, Some(dept_manager.id)).is_ok());
        assert!(can_view(&dept_manager, &employee, Some(dept_manager.id)).is_ok());
    }

    #[test]
    fn test_fallback_does_not_apply_with_manager_assigned() {
        let dept_manager = user(Role::Manager);
        let mut employee = user(Role::Employee);
        employee.manager_id = Some(Uuid::new_v4());

        assert_eq!(
            can_decide(&dept_manager, &employee, Some(dept_manager.id)),
            Err(PolicyError::NotAuthorized)
        );
    }

    #[test]
    fn test_employee_can_view_own_claim() {
        let employee = user(Role::Employee);
        assert!(can_view(&employee, &employee, None).is_ok());
    }

    #[test]
    fn test_employee_cannot_decide_own_claim() {
        let employee = user(Role::Employee);
        assert_eq!(
            can_decide(&employee, &employee, None),
            Err(PolicyError::NotAuthorized)
        );
    }

    #[test]
    fn test_unrelated_employee_cannot_view() {
        let actor = user(Role::Employee);
        let mut employee = user(Role::Employee);
        employee.manager_id = Some(Uuid::new_v4());
        assert_eq!(
            can_view(&actor, &employee, None),
            Err(PolicyError::NotAuthorized)
        );
    }

    #[test]
    fn test_admin_only() {
        assert!(admin_only(&user(Role::Admin)).is_ok());
        assert_eq!(
            admin_only(&user(Role::Manager)),
            Err(PolicyError::NotAuthorized)
        );
        assert_eq!(
            admin_only(&user(Role::Employee)),
            Err(PolicyError::NotAuthorized)
        );
    }

    #[test]
    fn test_visibility_scope() {
        let admin = user(Role::Admin);
        let manager = user(Role::Manager);
        let employee = user(Role::Employee);

        assert_eq!(visibility_scope(&admin), Visibility::All);
        assert_eq!(
            visibility_scope(&manager),
            Visibility::Subordinates(manager.id)
        );
        assert_eq!(visibility_scope(&employee), Visibility::Own(employee.id));
    }
}
