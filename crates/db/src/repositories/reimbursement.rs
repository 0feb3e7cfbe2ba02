//! Reimbursement repository: submission, decisions, and visibility.
//!
//! Every mutation in this module appends its audit row inside the same
//! database transaction as the change it records, so a committed claim
//! change is never missing its trail entry.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use claimdesk_core::audit::{AuditAction, mutation_comment};
use claimdesk_core::claim::{
    Category, ClaimDecision, ClaimError, ClaimStatus, ClaimWorkflow, validate_claim,
};
use claimdesk_core::org::{
    PolicyError, UserView, Visibility, can_decide, can_view, resolve_manager, visibility_scope,
};

use crate::entities::{audit_logs, departments, reimbursements, sea_orm_active_enums, users};

use super::user::user_view;

/// Input for submitting a new claim.
#[derive(Debug, Clone)]
pub struct SubmitClaimInput {
    /// Expense category.
    pub category: Category,
    /// Claimed amount.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// When the expense occurred.
    pub expense_date: NaiveDate,
    /// Reference to a supporting document, if any.
    pub document_ref: Option<String>,
}

/// Input for editing a pending claim.
#[derive(Debug, Clone, Default)]
pub struct UpdateClaimInput {
    /// New category, if changed.
    pub category: Option<Category>,
    /// New amount, if changed.
    pub amount: Option<Decimal>,
    /// New description, if changed.
    pub description: Option<String>,
    /// New expense date, if changed.
    pub expense_date: Option<NaiveDate>,
    /// New document reference, if changed.
    pub document_ref: Option<String>,
}

/// Claim counts by status for dashboard summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct StatusCounts {
    /// Total number of claims.
    pub total: u64,
    /// Claims awaiting a decision.
    pub pending: u64,
    /// Approved claims.
    pub approved: u64,
    /// Declined claims.
    pub declined: u64,
}

/// Reimbursement repository for claim lifecycle operations.
#[derive(Debug, Clone)]
pub struct ReimbursementRepository {
    db: DatabaseConnection,
}

impl ReimbursementRepository {
    /// Creates a new reimbursement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits a new claim for the given employee.
    ///
    /// The claim is validated against the category ceiling, the approver is
    /// resolved from the employee's manager (falling back to the configured
    /// default approver), and a `created` audit row is appended in the same
    /// transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The employee does not exist
    /// - The amount exceeds the category ceiling
    /// - The database operation fails
    pub async fn submit(
        &self,
        employee_id: Uuid,
        input: SubmitClaimInput,
        default_approver: Uuid,
    ) -> Result<reimbursements::Model, ClaimError> {
        let employee = self
            .find_user(employee_id)
            .await?
            .ok_or(ClaimError::Policy(PolicyError::NotAuthorized))?;

        validate_claim(Some(input.category), Some(input.amount))?;

        let approver = resolve_manager(employee.manager_id, default_approver);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        let now = Utc::now().into();
        let claim = reimbursements::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee.id),
            approver_id: Set(Some(approver)),
            category: Set(core_category_to_db(input.category)),
            amount: Set(input.amount),
            description: Set(input.description),
            expense_date: Set(input.expense_date),
            document_ref: Set(input.document_ref),
            status: Set(sea_orm_active_enums::ReimbursementStatus::Pending),
            manager_comments: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let claim = claim
            .insert(&txn)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        append_audit(
            &txn,
            claim.id,
            employee.id,
            AuditAction::Created,
            &employee.full_name,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        Ok(claim)
    }

    /// Edits a pending claim owned by the actor.
    ///
    /// Terminal claims cannot be edited. The merged category and amount are
    /// re-validated against the category ceiling, and an `updated` audit row
    /// is appended in the same transaction as the change.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The claim is not found
    /// - The actor does not own the claim
    /// - The claim has already been decided
    /// - The merged amount exceeds the category ceiling
    /// - The database operation fails
    pub async fn update(
        &self,
        claim_id: Uuid,
        actor_id: Uuid,
        input: UpdateClaimInput,
    ) -> Result<reimbursements::Model, ClaimError> {
        let claim = self.find_claim(claim_id).await?;

        if claim.employee_id != actor_id {
            return Err(ClaimError::Policy(PolicyError::NotAuthorized));
        }

        let status = db_status_to_core(&claim.status);
        if status.is_terminal() {
            return Err(ClaimError::InvalidTransition {
                from: status,
                to: ClaimStatus::Pending,
            });
        }

        let actor = self
            .find_user(actor_id)
            .await?
            .ok_or(ClaimError::Policy(PolicyError::NotAuthorized))?;

        let category = input
            .category
            .unwrap_or_else(|| db_category_to_core(&claim.category));
        let amount = input.amount.unwrap_or(claim.amount);
        validate_claim(Some(category), Some(amount))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        let claim_id = claim.id;
        let mut active: reimbursements::ActiveModel = claim.into();
        active.category = Set(core_category_to_db(category));
        active.amount = Set(amount);
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(expense_date) = input.expense_date {
            active.expense_date = Set(expense_date);
        }
        if let Some(document_ref) = input.document_ref {
            active.document_ref = Set(Some(document_ref));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        append_audit(
            &txn,
            claim_id,
            actor.id,
            AuditAction::Updated,
            &actor.full_name,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Approves a pending claim.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The claim is not found
    /// - The actor is not authorized to decide it
    /// - The claim has already been decided
    /// - The database operation fails
    pub async fn approve(
        &self,
        claim_id: Uuid,
        actor_id: Uuid,
        comments: Option<String>,
    ) -> Result<reimbursements::Model, ClaimError> {
        self.decide(claim_id, actor_id, ClaimStatus::Approved, comments)
            .await
    }

    /// Declines a pending claim.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The claim is not found
    /// - The actor is not authorized to decide it
    /// - The claim has already been decided
    /// - The database operation fails
    pub async fn decline(
        &self,
        claim_id: Uuid,
        actor_id: Uuid,
        comments: Option<String>,
    ) -> Result<reimbursements::Model, ClaimError> {
        self.decide(claim_id, actor_id, ClaimStatus::Declined, comments)
            .await
    }

    /// Deletes a claim, leaving a `deleted` audit row.
    ///
    /// The audit row is written before the delete in the same transaction;
    /// its claim reference is nulled by the delete, so the trail survives.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim is not found or the database
    /// operation fails.
    pub async fn delete(&self, claim_id: Uuid, actor_id: Uuid) -> Result<(), ClaimError> {
        let claim = self.find_claim(claim_id).await?;

        let actor = self
            .find_user(actor_id)
            .await?
            .ok_or(ClaimError::Policy(PolicyError::NotAuthorized))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        append_audit(
            &txn,
            claim.id,
            actor.id,
            AuditAction::Deleted,
            &actor.full_name,
        )
        .await?;

        reimbursements::Entity::delete_by_id(claim.id)
            .exec(&txn)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))
    }

    /// Fetches a single claim, enforcing the view policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim is not found, the actor may not view
    /// it, or the database query fails.
    pub async fn get_visible(
        &self,
        claim_id: Uuid,
        actor_id: Uuid,
    ) -> Result<reimbursements::Model, ClaimError> {
        let claim = self.find_claim(claim_id).await?;

        let actor = self
            .find_user(actor_id)
            .await?
            .ok_or(ClaimError::Policy(PolicyError::NotAuthorized))?;
        let employee = self
            .find_user(claim.employee_id)
            .await?
            .ok_or_else(|| ClaimError::Database(format!("claim {claim_id} has no employee row")))?;

        let department_manager = self.department_manager(&employee).await?;
        can_view(&user_view(&actor), &user_view(&employee), department_manager)?;

        Ok(claim)
    }

    /// Lists the claims visible to the actor, newest first.
    ///
    /// Admins see every claim; managers see their subordinates' claims and
    /// their own; employees see only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_visible(
        &self,
        actor_id: Uuid,
    ) -> Result<Vec<reimbursements::Model>, ClaimError> {
        let actor = self
            .find_user(actor_id)
            .await?
            .ok_or(ClaimError::Policy(PolicyError::NotAuthorized))?;

        let query = reimbursements::Entity::find()
            .order_by_desc(reimbursements::Column::CreatedAt);

        let claims = match visibility_scope(&user_view(&actor)) {
            Visibility::All => query.all(&self.db).await,
            Visibility::Own(id) => {
                query
                    .filter(reimbursements::Column::EmployeeId.eq(id))
                    .all(&self.db)
                    .await
            }
            Visibility::Subordinates(manager_id) => {
                let ids = self.subordinate_ids(manager_id).await?;
                query
                    .filter(reimbursements::Column::EmployeeId.is_in(ids))
                    .all(&self.db)
                    .await
            }
        };

        claims.map_err(|e| ClaimError::Database(e.to_string()))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    async fn decide(
        &self,
        claim_id: Uuid,
        actor_id: Uuid,
        new_status: ClaimStatus,
        comments: Option<String>,
    ) -> Result<reimbursements::Model, ClaimError> {
        let claim = self.find_claim(claim_id).await?;

        let actor = self
            .find_user(actor_id)
            .await?
            .ok_or(ClaimError::Policy(PolicyError::NotAuthorized))?;
        let employee = self
            .find_user(claim.employee_id)
            .await?
            .ok_or_else(|| ClaimError::Database(format!("claim {claim_id} has no employee row")))?;

        let department_manager = self.department_manager(&employee).await?;
        let decision = authorize_decision(
            &user_view(&actor),
            &user_view(&employee),
            department_manager,
            db_status_to_core(&claim.status),
            new_status,
            comments,
        )?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        let claim_id = claim.id;
        let mut active: reimbursements::ActiveModel = claim.into();
        active.status = Set(core_status_to_db(decision.new_status));
        active.manager_comments = Set(decision.comments.clone());
        active.updated_at = Set(decision.decided_at.into());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        append_audit(
            &txn,
            claim_id,
            actor.id,
            decision_action(decision.new_status),
            &actor.full_name,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        Ok(updated)
    }

    async fn find_claim(&self, claim_id: Uuid) -> Result<reimbursements::Model, ClaimError> {
        reimbursements::Entity::find_by_id(claim_id)
            .one(&self.db)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?
            .ok_or(ClaimError::ClaimNotFound(claim_id))
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<users::Model>, ClaimError> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))
    }

    /// Looks up the manager of the employee's department, if any.
    async fn department_manager(&self, employee: &users::Model) -> Result<Option<Uuid>, ClaimError> {
        let Some(department_id) = employee.department_id else {
            return Ok(None);
        };

        let department = departments::Entity::find_by_id(department_id)
            .one(&self.db)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        Ok(department.and_then(|d| d.manager_id))
    }

    /// Collects the employee IDs whose claims a manager may list: direct
    /// reports, unassigned members of departments the manager runs, and the
    /// manager's own.
    async fn subordinate_ids(&self, manager_id: Uuid) -> Result<Vec<Uuid>, ClaimError> {
        let direct = users::Entity::find()
            .filter(users::Column::ManagerId.eq(manager_id))
            .all(&self.db)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        let managed_departments = departments::Entity::find()
            .filter(departments::Column::ManagerId.eq(manager_id))
            .all(&self.db)
            .await
            .map_err(|e| ClaimError::Database(e.to_string()))?;

        let direct: Vec<Uuid> = direct.into_iter().map(|u| u.id).collect();

        let mut orphans = Vec::new();
        if !managed_departments.is_empty() {
            let department_ids: Vec<Uuid> =
                managed_departments.into_iter().map(|d| d.id).collect();
            orphans = users::Entity::find()
                .filter(users::Column::DepartmentId.is_in(department_ids))
                .filter(users::Column::ManagerId.is_null())
                .all(&self.db)
                .await
                .map_err(|e| ClaimError::Database(e.to_string()))?
                .into_iter()
                .map(|u| u.id)
                .collect();
        }

        Ok(merge_subordinate_ids(direct, orphans, manager_id))
    }
}

/// Merges the employee ID set whose claims a manager may list: direct
/// reports, unmanaged members of departments the manager runs, and the
/// manager themself. Sorted and deduplicated.
#[must_use]
pub fn merge_subordinate_ids(
    direct: Vec<Uuid>,
    department_orphans: Vec<Uuid>,
    manager_id: Uuid,
) -> Vec<Uuid> {
    let mut ids = direct;
    ids.extend(department_orphans);
    ids.push(manager_id);
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Runs the policy check and the status transition for a decision.
///
/// Pure: everything here must pass before a transaction is opened, so an
/// unauthorized or invalid decision never touches the database.
///
/// # Errors
///
/// Returns `ClaimError::Policy` when the actor may not decide the claim and
/// `ClaimError::InvalidTransition` when the claim is not pending.
pub fn authorize_decision(
    actor: &UserView,
    employee: &UserView,
    department_manager: Option<Uuid>,
    current_status: ClaimStatus,
    new_status: ClaimStatus,
    comments: Option<String>,
) -> Result<ClaimDecision, ClaimError> {
    can_decide(actor, employee, department_manager)?;

    match new_status {
        ClaimStatus::Approved => ClaimWorkflow::approve(current_status, actor.id, comments),
        ClaimStatus::Declined | ClaimStatus::Pending => {
            ClaimWorkflow::decline(current_status, actor.id, comments)
        }
    }
}

/// Appends an audit row for a claim mutation inside an open transaction.
async fn append_audit(
    txn: &sea_orm::DatabaseTransaction,
    claim_id: Uuid,
    actor_id: Uuid,
    action: AuditAction,
    actor_name: &str,
) -> Result<(), ClaimError> {
    let entry = audit_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        reimbursement_id: Set(Some(claim_id)),
        user_id: Set(Some(actor_id)),
        action: Set(core_action_to_db(action)),
        comments: Set(mutation_comment(action, actor_name)),
        created_at: Set(Utc::now().into()),
    };

    entry
        .insert(txn)
        .await
        .map_err(|e| ClaimError::Database(e.to_string()))?;

    Ok(())
}

/// Counts claims by status for dashboard summaries.
#[must_use]
pub fn status_counts(claims: &[reimbursements::Model]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: claims.len() as u64,
        ..StatusCounts::default()
    };

    for claim in claims {
        match claim.status {
            sea_orm_active_enums::ReimbursementStatus::Pending => counts.pending += 1,
            sea_orm_active_enums::ReimbursementStatus::Approved => counts.approved += 1,
            sea_orm_active_enums::ReimbursementStatus::Declined => counts.declined += 1,
        }
    }

    counts
}

// ============================================================================
// Conversion helpers
// ============================================================================

/// Converts a database status to the core status.
#[must_use]
pub fn db_status_to_core(status: &sea_orm_active_enums::ReimbursementStatus) -> ClaimStatus {
    match status {
        sea_orm_active_enums::ReimbursementStatus::Pending => ClaimStatus::Pending,
        sea_orm_active_enums::ReimbursementStatus::Approved => ClaimStatus::Approved,
        sea_orm_active_enums::ReimbursementStatus::Declined => ClaimStatus::Declined,
    }
}

/// Converts a core status to the database status.
#[must_use]
pub fn core_status_to_db(status: ClaimStatus) -> sea_orm_active_enums::ReimbursementStatus {
    match status {
        ClaimStatus::Pending => sea_orm_active_enums::ReimbursementStatus::Pending,
        ClaimStatus::Approved => sea_orm_active_enums::ReimbursementStatus::Approved,
        ClaimStatus::Declined => sea_orm_active_enums::ReimbursementStatus::Declined,
    }
}

/// Converts a database category to the core category.
#[must_use]
pub fn db_category_to_core(
    category: &sea_orm_active_enums::ReimbursementCategory,
) -> Category {
    match category {
        sea_orm_active_enums::ReimbursementCategory::Travel => Category::Travel,
        sea_orm_active_enums::ReimbursementCategory::Relocation => Category::Relocation,
        sea_orm_active_enums::ReimbursementCategory::TechAssets => Category::TechAssets,
    }
}

/// Converts a core category to the database category.
#[must_use]
pub fn core_category_to_db(
    category: Category,
) -> sea_orm_active_enums::ReimbursementCategory {
    match category {
        Category::Travel => sea_orm_active_enums::ReimbursementCategory::Travel,
        Category::Relocation => sea_orm_active_enums::ReimbursementCategory::Relocation,
        Category::TechAssets => sea_orm_active_enums::ReimbursementCategory::TechAssets,
    }
}

/// Converts a core audit action to the database action.
#[must_use]
pub fn core_action_to_db(action: AuditAction) -> sea_orm_active_enums::AuditAction {
    match action {
        AuditAction::Created => sea_orm_active_enums::AuditAction::Created,
        AuditAction::Updated => sea_orm_active_enums::AuditAction::Updated,
        AuditAction::Approved => sea_orm_active_enums::AuditAction::Approved,
        AuditAction::Declined => sea_orm_active_enums::AuditAction::Declined,
        AuditAction::Deleted => sea_orm_active_enums::AuditAction::Deleted,
        AuditAction::Accessed => sea_orm_active_enums::AuditAction::Accessed,
    }
}

/// Maps a decided status to its audit action.
#[must_use]
pub fn decision_action(status: ClaimStatus) -> AuditAction {
    match status {
        ClaimStatus::Approved => AuditAction::Approved,
        ClaimStatus::Declined => AuditAction::Declined,
        ClaimStatus::Pending => AuditAction::Updated,
    }
}

#[cfg(test)]
#[path = "reimbursement_tests.rs"]
mod reimbursement_tests;
