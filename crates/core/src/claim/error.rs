//! Claim error types for the reimbursement lifecycle.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::claim::types::{Category, ClaimStatus};
use crate::org::PolicyError;

/// Errors that can occur during claim operations.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Category was not provided.
    #[error("Category is required")]
    CategoryRequired,

    /// Amount was not provided.
    #[error("Amount is required")]
    AmountRequired,

    /// Amount exceeds the ceiling for the chosen category.
    #[error("Amount {amount} exceeds the limit {limit} for {category} category")]
    ExceedsCategoryLimit {
        /// The chosen category.
        category: Category,
        /// The requested amount.
        amount: Decimal,
        /// The category ceiling.
        limit: Decimal,
    },

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ClaimStatus,
        /// The attempted target status.
        to: ClaimStatus,
    },

    /// Claim not found.
    #[error("Reimbursement {0} not found")]
    ClaimNotFound(Uuid),

    /// Actor is not authorized for the operation.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ClaimError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::CategoryRequired
            | Self::AmountRequired
            | Self::ExceedsCategoryLimit { .. }
            | Self::InvalidTransition { .. } => 400,
            Self::Policy(_) => 403,
            Self::ClaimNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CategoryRequired => "CATEGORY_REQUIRED",
            Self::AmountRequired => "AMOUNT_REQUIRED",
            Self::ExceedsCategoryLimit { .. } => "EXCEEDS_CATEGORY_LIMIT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ClaimNotFound(_) => "CLAIM_NOT_FOUND",
            Self::Policy(_) => "NOT_AUTHORIZED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exceeds_limit_error() {
        let err = ClaimError::ExceedsCategoryLimit {
            category: Category::Travel,
            amount: dec!(15001),
            limit: dec!(15000),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "EXCEEDS_CATEGORY_LIMIT");
        assert!(err.to_string().contains("travel"));
        assert!(err.to_string().contains("15001"));
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = ClaimError::InvalidTransition {
            from: ClaimStatus::Declined,
            to: ClaimStatus::Approved,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("declined"));
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_not_found_error() {
        let err = ClaimError::ClaimNotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "CLAIM_NOT_FOUND");
    }

    #[test]
    fn test_policy_error_converts() {
        let err: ClaimError = PolicyError::NotAuthorized.into();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_AUTHORIZED");
    }

    #[test]
    fn test_required_field_errors() {
        assert_eq!(ClaimError::CategoryRequired.status_code(), 400);
        assert_eq!(ClaimError::AmountRequired.error_code(), "AMOUNT_REQUIRED");
    }
}
