//! Audit trail actions and comment formatting.
//!
//! The audit log is an append-only record of claim mutations and access
//! events. This module defines the action vocabulary and the comment
//! strings recorded with each entry; the actual persistence lives in the
//! database layer, which appends the row in the same transaction as the
//! mutation it records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Action recorded in an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A claim was submitted.
    Created,
    /// A claim was edited without a status change.
    Updated,
    /// A claim was approved.
    Approved,
    /// A claim was declined.
    Declined,
    /// A claim was deleted.
    Deleted,
    /// An authenticated request was served.
    Accessed,
}

impl AuditAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::Deleted => "deleted",
            Self::Accessed => "accessed",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "approved" => Some(Self::Approved),
            "declined" => Some(Self::Declined),
            "deleted" => Some(Self::Deleted),
            "accessed" => Some(Self::Accessed),
            _ => None,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds the comment recorded with a claim mutation.
#[must_use]
pub fn mutation_comment(action: AuditAction, actor_name: &str) -> String {
    format!("Reimbursement {action} by {actor_name}")
}

/// Builds the comment recorded with an access event.
#[must_use]
pub fn access_comment(path: &str, source_addr: &str) -> String {
    format!("Accessed {path} from IP {source_addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trip() {
        for action in [
            AuditAction::Created,
            AuditAction::Updated,
            AuditAction::Approved,
            AuditAction::Declined,
            AuditAction::Deleted,
            AuditAction::Accessed,
        ] {
            assert_eq!(AuditAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(AuditAction::parse("archived"), None);
    }

    #[test]
    fn test_mutation_comment() {
        assert_eq!(
            mutation_comment(AuditAction::Created, "alice"),
            "Reimbursement created by alice"
        );
        assert_eq!(
            mutation_comment(AuditAction::Declined, "bob"),
            "Reimbursement declined by bob"
        );
    }

    #[test]
    fn test_access_comment() {
        assert_eq!(
            access_comment("/api/v1/reimbursements", "10.0.0.9"),
            "Accessed /api/v1/reimbursements from IP 10.0.0.9"
        );
    }
}
