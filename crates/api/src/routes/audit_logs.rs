//! Audit log routes (admin only).

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use claimdesk_db::AuditLogRepository;
use claimdesk_shared::types::PageRequest;

use crate::{AppState, middleware::auth::AuthUser};

use super::{database_error_response, require_admin};

/// Creates the audit log router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list))
}

/// GET /audit-logs - Recent audit rows, newest first, paginated.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let repo = AuditLogRepository::new((*state.db).clone());
    match repo.list_recent(&page).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => database_error_response(&e.to_string()),
    }
}
