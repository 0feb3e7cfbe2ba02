//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use claimdesk_core::audit::{AuditAction, mutation_comment};
use claimdesk_core::org::{Role, UserView};

use crate::entities::{
    audit_logs, reimbursements,
    sea_orm_active_enums::{self, UserRole},
    users,
};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// User not found.
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    /// Email is already registered.
    #[error("Email {0} is already registered")]
    EmailTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl UserError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UserNotFound(_) => 404,
            Self::EmailTaken(_) => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Role assigned at creation.
    pub role: Role,
    /// Department the user belongs to.
    pub department_id: Option<Uuid>,
    /// Direct manager, if already known.
    pub manager_id: Option<Uuid>,
}

/// User repository for CRUD and staff management operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, UserError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` if the email is already registered,
    /// or a database error.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        if self.email_exists(&input.email).await? {
            return Err(UserError::EmailTaken(input.email));
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            full_name: Set(input.full_name),
            role: Set(core_role_to_db(input.role)),
            department_id: Set(input.department_id),
            manager_id: Set(input.manager_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Lists all non-admin staff, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_staff(&self) -> Result<Vec<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::Role.ne(UserRole::Admin))
            .order_by_asc(users::Column::FullName)
            .all(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Lists all managers, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_managers(&self) -> Result<Vec<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Manager))
            .order_by_asc(users::Column::FullName)
            .all(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Promotes an employee to manager.
    ///
    /// The promotion is idempotent for users who are already managers, and
    /// never demotes an admin.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UserNotFound` if the user does not exist,
    /// or a database error.
    pub async fn promote_to_manager(&self, user_id: Uuid) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound(user_id))?;

        let promoted = db_role_to_core(&user.role).promoted();

        let mut active: users::ActiveModel = user.into();
        active.role = Set(core_role_to_db(promoted));
        active.updated_at = Set(chrono::Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Assigns (or clears) an employee's direct manager.
    ///
    /// An unassigned manager is stored as NULL; the accountable party is
    /// resolved against the configured default approver at read time.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UserNotFound` if the employee does not exist,
    /// or a database error.
    pub async fn assign_manager(
        &self,
        employee_id: Uuid,
        manager_id: Option<Uuid>,
    ) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(employee_id)
            .await?
            .ok_or(UserError::UserNotFound(employee_id))?;

        if let Some(manager_id) = manager_id {
            self.find_by_id(manager_id)
                .await?
                .ok_or(UserError::UserNotFound(manager_id))?;
        }

        let mut active: users::ActiveModel = user.into();
        active.manager_id = Set(manager_id);
        active.updated_at = Set(chrono::Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Deletes an employee together with their claims.
    ///
    /// Each removed claim leaves a `deleted` audit row; the rows survive the
    /// delete because the reimbursement reference is nulled, not cascaded.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UserNotFound` if the employee does not exist,
    /// or a database error.
    pub async fn delete_employee(&self, employee_id: Uuid, actor_name: &str) -> Result<(), UserError> {
        let user = self
            .find_by_id(employee_id)
            .await?
            .ok_or(UserError::UserNotFound(employee_id))?;

        let claims = reimbursements::Entity::find()
            .filter(reimbursements::Column::EmployeeId.eq(employee_id))
            .all(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        let now = chrono::Utc::now().into();
        for claim in &claims {
            let entry = audit_logs::ActiveModel {
                id: Set(Uuid::new_v4()),
                reimbursement_id: Set(Some(claim.id)),
                user_id: Set(Some(employee_id)),
                action: Set(sea_orm_active_enums::AuditAction::Deleted),
                comments: Set(mutation_comment(AuditAction::Deleted, actor_name)),
                created_at: Set(now),
            };
            entry
                .insert(&txn)
                .await
                .map_err(|e| UserError::Database(e.to_string()))?;
        }

        users::Entity::delete_by_id(user.id)
            .exec(&txn)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }
}

// ============================================================================
// Conversion helpers
// ============================================================================

/// Converts a database role to the core role.
#[must_use]
pub fn db_role_to_core(role: &UserRole) -> Role {
    match role {
        UserRole::Employee => Role::Employee,
        UserRole::Manager => Role::Manager,
        UserRole::Admin => Role::Admin,
    }
}

/// Converts a core role to the database role.
#[must_use]
pub fn core_role_to_db(role: Role) -> UserRole {
    match role {
        Role::Employee => UserRole::Employee,
        Role::Manager => UserRole::Manager,
        Role::Admin => UserRole::Admin,
    }
}

/// Builds the policy view of a user row.
#[must_use]
pub fn user_view(user: &users::Model) -> UserView {
    UserView {
        id: user.id,
        role: db_role_to_core(&user.role),
        department_id: user.department_id,
        manager_id: user.manager_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversion_round_trip() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert_eq!(db_role_to_core(&core_role_to_db(role)), role);
        }
    }

    #[test]
    fn test_user_view_carries_policy_fields() {
        let dept = Uuid::new_v4();
        let manager = Uuid::new_v4();
        let user = users::Model {
            id: Uuid::new_v4(),
            email: "jo@example.com".to_string(),
            password_hash: String::new(),
            full_name: "Jo".to_string(),
            role: UserRole::Manager,
            department_id: Some(dept),
            manager_id: Some(manager),
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        };

        let view = user_view(&user);
        assert_eq!(view.role, Role::Manager);
        assert_eq!(view.department_id, Some(dept));
        assert_eq!(view.manager_id, Some(manager));
    }
}
