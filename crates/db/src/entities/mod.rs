//! `SeaORM` entity definitions.

pub mod audit_logs;
pub mod departments;
pub mod reimbursements;
pub mod sea_orm_active_enums;
pub mod users;
