//! User roles in the portal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role in the portal.
///
/// Exactly one role per user. The enum replaces a pair of boolean flags,
/// so the invalid employee-and-manager combination is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits reimbursement claims.
    Employee,
    /// Decides claims of direct subordinates; may also submit own claims.
    Manager,
    /// Full access: decides any claim, manages departments and staff.
    Admin,
}

impl Role {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns true if this role carries the manager flag.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Manager)
    }

    /// Returns true if this role carries the employee flag.
    #[must_use]
    pub fn is_employee(&self) -> bool {
        matches!(self, Self::Employee)
    }

    /// Returns true if this role is the global administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the role after a promotion to manager.
    ///
    /// Employees become managers; managers stay managers (the operation is
    /// idempotent); admins are never demoted by a promotion.
    #[must_use]
    pub fn promoted(&self) -> Self {
        match self {
            Self::Employee | Self::Manager => Self::Manager,
            Self::Admin => Self::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::parse("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
    }

    #[test]
    fn test_flag_accessors_are_exclusive() {
        assert!(Role::Employee.is_employee());
        assert!(!Role::Employee.is_manager());
        assert!(Role::Manager.is_manager());
        assert!(!Role::Manager.is_employee());
        assert!(!Role::Admin.is_employee());
        assert!(!Role::Admin.is_manager());
    }

    #[test]
    fn test_promotion_is_idempotent() {
        let once = Role::Employee.promoted();
        let twice = once.promoted();
        assert_eq!(once, Role::Manager);
        assert_eq!(twice, Role::Manager);
        assert!(twice.is_manager());
        assert!(!twice.is_employee());
    }

    #[test]
    fn test_promotion_keeps_admin() {
        assert_eq!(Role::Admin.promoted(), Role::Admin);
    }
}
