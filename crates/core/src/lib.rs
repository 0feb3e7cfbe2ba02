//! Core business logic for Claimdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and authorization predicates live here.
//!
//! # Modules
//!
//! - `claim` - Reimbursement validation and lifecycle state machine
//! - `org` - Roles, authorization policy, and manager resolution
//! - `audit` - Audit trail actions and comment formatting
//! - `auth` - Password hashing

pub mod audit;
pub mod auth;
pub mod claim;
pub mod org;
