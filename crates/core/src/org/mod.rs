//! Organization model: roles, authorization policy, manager resolution.
//!
//! # Modules
//!
//! - `role` - The closed role enum (Employee, Manager, Admin)
//! - `policy` - Centralized authorization predicates
//! - `resolution` - Manager/accountable-party resolution
//! - `error` - Policy error types

pub mod error;
pub mod policy;
pub mod resolution;
pub mod role;

#[cfg(test)]
mod policy_props;

pub use error::PolicyError;
pub use policy::{UserView, Visibility, admin_only, can_decide, can_view, visibility_scope};
pub use resolution::resolve_manager;
pub use role::Role;
