//! Claim workflow service for status transitions.
//!
//! This module implements the state machine for moving claims through
//! the approval lifecycle. The transition table is deliberately explicit:
//! the only rows are Pending → Approved and Pending → Declined, so a
//! decided claim can never be silently re-decided.

use chrono::Utc;
use uuid::Uuid;

use crate::claim::error::ClaimError;
use crate::claim::types::{ClaimDecision, ClaimStatus};

/// Stateless service for claim workflow transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning a `ClaimDecision` carrying the
/// audit trail information.
pub struct ClaimWorkflow;

impl ClaimWorkflow {
    /// Approves a pending claim.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the claim
    /// * `decided_by` - The user approving the claim
    /// * `comments` - Optional comments from the approver
    ///
    /// # Returns
    /// * `Ok(ClaimDecision)` if the claim is pending
    /// * `Err(ClaimError::InvalidTransition)` otherwise
    pub fn approve(
        current_status: ClaimStatus,
        decided_by: Uuid,
        comments: Option<String>,
    ) -> Result<ClaimDecision, ClaimError> {
        Self::decide(current_status, ClaimStatus::Approved, decided_by, comments)
    }

    /// Declines a pending claim.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the claim
    /// * `decided_by` - The user declining the claim
    /// * `comments` - Optional comments from the approver
    ///
    /// # Returns
    /// * `Ok(ClaimDecision)` if the claim is pending
    /// * `Err(ClaimError::InvalidTransition)` otherwise
    pub fn decline(
        current_status: ClaimStatus,
        decided_by: Uuid,
        comments: Option<String>,
    ) -> Result<ClaimDecision, ClaimError> {
        Self::decide(current_status, ClaimStatus::Declined, decided_by, comments)
    }

    /// Checks if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Declined (decline)
    ///
    /// # Returns
    /// `true` if the transition is valid, `false` otherwise
    #[must_use]
    pub fn is_valid_transition(from: ClaimStatus, to: ClaimStatus) -> bool {
        matches!(
            (from, to),
            (
                ClaimStatus::Pending,
                ClaimStatus::Approved | ClaimStatus::Declined
            )
        )
    }

    fn decide(
        current_status: ClaimStatus,
        new_status: ClaimStatus,
        decided_by: Uuid,
        comments: Option<String>,
    ) -> Result<ClaimDecision, ClaimError> {
        if !Self::is_valid_transition(current_status, new_status) {
            return Err(ClaimError::InvalidTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(ClaimDecision {
            new_status,
            decided_by,
            decided_at: Utc::now(),
            comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_from_pending() {
        let user_id = Uuid::new_v4();
        let decision =
            ClaimWorkflow::approve(ClaimStatus::Pending, user_id, Some("ok".to_string())).unwrap();
        assert_eq!(decision.new_status, ClaimStatus::Approved);
        assert_eq!(decision.decided_by, user_id);
        assert_eq!(decision.comments.as_deref(), Some("ok"));
    }

    #[test]
    fn test_decline_from_pending() {
        let user_id = Uuid::new_v4();
        let decision = ClaimWorkflow::decline(ClaimStatus::Pending, user_id, None).unwrap();
        assert_eq!(decision.new_status, ClaimStatus::Declined);
    }

    #[test]
    fn test_approve_from_approved_fails() {
        let result = ClaimWorkflow::approve(ClaimStatus::Approved, Uuid::new_v4(), None);
        assert!(matches!(result, Err(ClaimError::InvalidTransition { .. })));
    }

    #[test]
    fn test_approve_from_declined_fails() {
        let result = ClaimWorkflow::approve(ClaimStatus::Declined, Uuid::new_v4(), None);
        assert!(matches!(
            result,
            Err(ClaimError::InvalidTransition {
                from: ClaimStatus::Declined,
                to: ClaimStatus::Approved,
            })
        ));
    }

    #[test]
    fn test_decline_from_terminal_fails() {
        for from in [ClaimStatus::Approved, ClaimStatus::Declined] {
            let result = ClaimWorkflow::decline(from, Uuid::new_v4(), None);
            assert!(matches!(result, Err(ClaimError::InvalidTransition { .. })));
        }
    }

    #[test]
    fn test_transition_table() {
        assert!(ClaimWorkflow::is_valid_transition(
            ClaimStatus::Pending,
            ClaimStatus::Approved
        ));
        assert!(ClaimWorkflow::is_valid_transition(
            ClaimStatus::Pending,
            ClaimStatus::Declined
        ));

        assert!(!ClaimWorkflow::is_valid_transition(
            ClaimStatus::Approved,
            ClaimStatus::Declined
        ));
        assert!(!ClaimWorkflow::is_valid_transition(
            ClaimStatus::Declined,
            ClaimStatus::Approved
        ));
        assert!(!ClaimWorkflow::is_valid_transition(
            ClaimStatus::Approved,
            ClaimStatus::Pending
        ));
        assert!(!ClaimWorkflow::is_valid_transition(
            ClaimStatus::Pending,
            ClaimStatus::Pending
        ));
    }
}
