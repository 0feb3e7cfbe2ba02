//! Reimbursement claim lifecycle management.
//!
//! This module implements the claim state machine, category limits,
//! and the validation applied on every submission and save path.
//!
//! # Modules
//!
//! - `types` - Claim domain types (Category, ClaimStatus, ClaimDecision)
//! - `error` - Claim-specific error types
//! - `validation` - Category-limit validation
//! - `workflow` - State transition logic

pub mod error;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod validation_props;
#[cfg(test)]
mod workflow_props;

pub use error::ClaimError;
pub use types::{Category, ClaimDecision, ClaimStatus};
pub use validation::validate_claim;
pub use workflow::ClaimWorkflow;
