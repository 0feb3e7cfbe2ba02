//! Active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role within the portal.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular employee.
    #[sea_orm(string_value = "employee")]
    Employee,
    /// Manager who can decide on subordinates' claims.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Administrator with full access.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Expense category of a reimbursement claim.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reimbursement_category")]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementCategory {
    /// Travelling expenses.
    #[sea_orm(string_value = "travel")]
    Travel,
    /// Re-location expenses.
    #[sea_orm(string_value = "relocation")]
    Relocation,
    /// Tech asset purchases.
    #[sea_orm(string_value = "tech_assets")]
    TechAssets,
}

/// Lifecycle status of a reimbursement claim.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reimbursement_status")]
#[serde(rename_all = "lowercase")]
pub enum ReimbursementStatus {
    /// Awaiting a decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved by a manager or admin.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined by a manager or admin.
    #[sea_orm(string_value = "declined")]
    Declined,
}

/// Action recorded in an audit log row.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "audit_action")]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Claim submitted.
    #[sea_orm(string_value = "created")]
    Created,
    /// Claim edited without a status change.
    #[sea_orm(string_value = "updated")]
    Updated,
    /// Claim approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Claim declined.
    #[sea_orm(string_value = "declined")]
    Declined,
    /// Claim deleted.
    #[sea_orm(string_value = "deleted")]
    Deleted,
    /// Authenticated request served.
    #[sea_orm(string_value = "accessed")]
    Accessed,
}
