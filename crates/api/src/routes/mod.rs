//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use claimdesk_core::claim::ClaimError;
use claimdesk_core::org::admin_only;
use claimdesk_db::{UserRepository, entities::users, repositories::user::user_view};
use claimdesk_shared::AppError;

use crate::{
    AppState,
    middleware::{
        access_log::access_log_middleware,
        auth::{AuthUser, auth_middleware},
    },
};

pub mod audit_logs;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod health;
pub mod reimbursements;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication. The access audit layer
    // sits inside the auth layer so it only sees authenticated requests.
    let protected_routes = Router::new()
        .merge(reimbursements::routes())
        .merge(dashboard::routes())
        .merge(departments::routes())
        .merge(employees::routes())
        .merge(audit_logs::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Builds the response for a claim error.
///
/// Authorization failures never surface as a bare 403: the caller is
/// redirected (303 See Other) to the configured fallback path instead.
pub(crate) fn claim_error_response(state: &AppState, err: &ClaimError) -> Response {
    if matches!(err, ClaimError::Policy(_)) {
        return Redirect::to(&state.portal.fallback_path).into_response();
    }

    (
        status_from(err.status_code()),
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Redirects to the configured fallback path (303 See Other).
pub(crate) fn fallback_redirect(state: &AppState) -> Response {
    Redirect::to(&state.portal.fallback_path).into_response()
}

/// Builds the response for a cross-cutting application error.
pub(crate) fn app_error_response(err: &AppError) -> Response {
    (
        status_from(err.status_code()),
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Builds a 500 response for an unexpected database error.
///
/// The underlying error is logged; the caller only sees a generic message.
pub(crate) fn database_error_response(message: &str) -> Response {
    tracing::error!(error = %message, "Database error");
    app_error_response(&AppError::Database("An internal error occurred".to_string()))
}

pub(crate) fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Loads the actor's user row, requiring the admin role.
///
/// Non-admin actors are redirected to the fallback path.
pub(crate) async fn require_admin(
    state: &AppState,
    auth: &AuthUser,
) -> Result<users::Model, Response> {
    let actor = load_actor(state, auth).await?;

    if admin_only(&user_view(&actor)).is_err() {
        return Err(fallback_redirect(state));
    }

    Ok(actor)
}

/// Loads the actor's user row from the database.
///
/// A token whose user no longer exists is treated as unauthorized.
pub(crate) async fn load_actor(
    state: &AppState,
    auth: &AuthUser,
) -> Result<users::Model, Response> {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(app_error_response(&AppError::Unauthorized(
            "Account no longer exists".to_string(),
        ))),
        Err(e) => Err(database_error_response(&e.to_string())),
    }
}
