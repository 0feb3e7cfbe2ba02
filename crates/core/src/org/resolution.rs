//! Manager and accountable-party resolution.
//!
//! Every non-admin user must have a resolvable accountable party. When no
//! manager is assigned, the configured default approver stands in. The
//! default approver is a deployment-time setting, not a "first admin row"
//! lookup, so the result never depends on row-insertion order.

use uuid::Uuid;

/// Resolves the accountable manager for a user or claim.
///
/// An existing assignment always wins; otherwise the configured default
/// approver is returned.
#[must_use]
pub fn resolve_manager(manager_id: Option<Uuid>, default_approver: Uuid) -> Uuid {
    manager_id.unwrap_or(default_approver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_manager_wins() {
        let manager = Uuid::new_v4();
        let admin = Uuid::new_v4();
        assert_eq!(resolve_manager(Some(manager), admin), manager);
    }

    #[test]
    fn test_falls_back_to_default_approver() {
        let admin = Uuid::new_v4();
        assert_eq!(resolve_manager(None, admin), admin);
    }
}
