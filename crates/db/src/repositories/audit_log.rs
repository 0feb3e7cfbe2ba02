//! Audit log repository.
//!
//! Mutation rows are appended by the reimbursement and user repositories
//! inside their own transactions; this repository covers access events
//! and read paths.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use claimdesk_core::audit::access_comment;
use claimdesk_shared::types::{PageRequest, PageResponse};

use crate::entities::{audit_logs, sea_orm_active_enums::AuditAction};

/// Audit log repository for access events and trail reads.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    /// Creates a new audit log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an access event for an authenticated request.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn append_access(
        &self,
        user_id: Uuid,
        path: &str,
        source_addr: &str,
    ) -> Result<audit_logs::Model, DbErr> {
        let entry = audit_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            reimbursement_id: Set(None),
            user_id: Set(Some(user_id)),
            action: Set(AuditAction::Accessed),
            comments: Set(access_comment(path, source_addr)),
            created_at: Set(chrono::Utc::now().into()),
        };

        entry.insert(&self.db).await
    }

    /// Lists the trail of a single claim, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_reimbursement(
        &self,
        reimbursement_id: Uuid,
    ) -> Result<Vec<audit_logs::Model>, DbErr> {
        audit_logs::Entity::find()
            .filter(audit_logs::Column::ReimbursementId.eq(reimbursement_id))
            .order_by_asc(audit_logs::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists recent audit rows, newest first, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_recent(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<audit_logs::Model>, DbErr> {
        let paginator = audit_logs::Entity::find()
            .order_by_desc(audit_logs::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}
