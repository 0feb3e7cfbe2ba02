//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Whether the claim store answered a ping.
    pub claim_store: &'static str,
    /// Service version.
    pub version: &'static str,
}

fn overall_status(store_ok: bool) -> &'static str {
    if store_ok { "healthy" } else { "degraded" }
}

fn store_status(store_ok: bool) -> &'static str {
    if store_ok { "reachable" } else { "unreachable" }
}

/// Health check handler. Reports degraded when the claim store does not
/// answer a ping; the endpoint itself always responds.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_ok = state.db.ping().await.is_ok();

    Json(HealthResponse {
        status: overall_status(store_ok),
        claim_store: store_status(store_ok),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
