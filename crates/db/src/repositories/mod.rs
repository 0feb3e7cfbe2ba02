//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod audit_log;
pub mod department;
pub mod reimbursement;
pub mod user;

pub use audit_log::AuditLogRepository;
pub use department::{DepartmentError, DepartmentRepository};
pub use reimbursement::{
    ReimbursementRepository, StatusCounts, SubmitClaimInput, UpdateClaimInput,
};
pub use user::{CreateUserInput, UserError, UserRepository};
