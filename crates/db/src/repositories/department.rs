//! Department repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{departments, users};

/// Errors that can occur during department operations.
#[derive(Debug, Error)]
pub enum DepartmentError {
    /// Department not found.
    #[error("Department {0} not found")]
    DepartmentNotFound(Uuid),

    /// Referenced manager account not found.
    #[error("Manager {0} not found")]
    ManagerNotFound(Uuid),

    /// A department with the same name already exists.
    #[error("Department {0} already exists")]
    NameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl DepartmentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DepartmentNotFound(_) | Self::ManagerNotFound(_) => 404,
            Self::NameTaken(_) => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DepartmentNotFound(_) => "DEPARTMENT_NOT_FOUND",
            Self::ManagerNotFound(_) => "MANAGER_NOT_FOUND",
            Self::NameTaken(_) => "DEPARTMENT_NAME_TAKEN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Department repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    db: DatabaseConnection,
}

impl DepartmentRepository {
    /// Creates a new department repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<departments::Model>, DepartmentError> {
        departments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DepartmentError::Database(e.to_string()))
    }

    /// Creates a new department.
    ///
    /// # Errors
    ///
    /// Returns `DepartmentError::NameTaken` if the name is already used,
    /// or a database error.
    pub async fn create(
        &self,
        name: &str,
        manager_id: Option<Uuid>,
    ) -> Result<departments::Model, DepartmentError> {
        let count = departments::Entity::find()
            .filter(departments::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| DepartmentError::Database(e.to_string()))?;
        if count > 0 {
            return Err(DepartmentError::NameTaken(name.to_string()));
        }

        let now = chrono::Utc::now().into();
        let department = departments::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            manager_id: Set(manager_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        department
            .insert(&self.db)
            .await
            .map_err(|e| DepartmentError::Database(e.to_string()))
    }

    /// Lists all departments, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<departments::Model>, DepartmentError> {
        departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DepartmentError::Database(e.to_string()))
    }

    /// Sets (or clears) the manager of a department.
    ///
    /// # Errors
    ///
    /// Returns `DepartmentError::DepartmentNotFound` if the department does
    /// not exist, `DepartmentError::ManagerNotFound` if the referenced
    /// manager account does not exist, or a database error.
    pub async fn set_manager(
        &self,
        department_id: Uuid,
        manager_id: Option<Uuid>,
    ) -> Result<departments::Model, DepartmentError> {
        let department = self
            .find_by_id(department_id)
            .await?
            .ok_or(DepartmentError::DepartmentNotFound(department_id))?;

        if let Some(manager_id) = manager_id {
            users::Entity::find_by_id(manager_id)
                .one(&self.db)
                .await
                .map_err(|e| DepartmentError::Database(e.to_string()))?
                .ok_or(DepartmentError::ManagerNotFound(manager_id))?;
        }

        let mut active: departments::ActiveModel = department.into();
        active.manager_id = Set(manager_id);
        active.updated_at = Set(chrono::Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| DepartmentError::Database(e.to_string()))
    }

    /// Deletes a department.
    ///
    /// Members keep their accounts; their department reference is nulled
    /// by the foreign key, not cascaded.
    ///
    /// # Errors
    ///
    /// Returns `DepartmentError::DepartmentNotFound` if the department does
    /// not exist, or a database error.
    pub async fn delete(&self, department_id: Uuid) -> Result<(), DepartmentError> {
        let department = self
            .find_by_id(department_id)
            .await?
            .ok_or(DepartmentError::DepartmentNotFound(department_id))?;

        departments::Entity::delete_by_id(department.id)
            .exec(&self.db)
            .await
            .map_err(|e| DepartmentError::Database(e.to_string()))?;

        Ok(())
    }
}
