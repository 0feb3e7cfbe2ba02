//! Dashboard summary route.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use claimdesk_db::{ReimbursementRepository, repositories::reimbursement::status_counts};

use crate::{AppState, middleware::auth::AuthUser};

use super::claim_error_response;

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(summary))
}

/// GET /dashboard - Status counts over the actor's visible claims.
async fn summary(State(state): State<AppState>, auth: AuthUser) -> Response {
    let repo = ReimbursementRepository::new((*state.db).clone());

    match repo.list_visible(auth.user_id()).await {
        Ok(claims) => {
            let counts = status_counts(&claims);
            let recent: Vec<_> = claims.into_iter().take(5).collect();
            (
                StatusCode::OK,
                Json(json!({ "counts": counts, "recent": recent })),
            )
                .into_response()
        }
        Err(e) => claim_error_response(&state, &e),
    }
}
