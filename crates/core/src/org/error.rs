//! Policy error types.

use thiserror::Error;

/// Errors produced by the authorization policy.
///
/// Deliberately carries no detail about which check failed: the HTTP
/// boundary answers every policy failure with the same redirect to the
/// fallback view, and the reason is only logged server-side.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The actor is not permitted to perform the operation.
    #[error("User is not authorized for this operation")]
    NotAuthorized,
}

impl PolicyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        403
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        "NOT_AUTHORIZED"
    }
}
