//! Request middleware.

pub mod access_log;
pub mod auth;
