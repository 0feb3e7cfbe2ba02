//! Department management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use claimdesk_db::{DepartmentRepository, repositories::department::DepartmentError};

use crate::{AppState, middleware::auth::AuthUser};

use super::{require_admin, status_from};

/// Creates the department router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list).post(create))
        .route("/departments/{id}", axum::routing::delete(remove))
        .route("/departments/{id}/manager", put(set_manager))
}

/// Request body for creating a department.
#[derive(Debug, Deserialize)]
struct CreateDepartmentRequest {
    name: String,
    manager_id: Option<Uuid>,
}

/// Request body for setting a department manager.
#[derive(Debug, Deserialize, Default)]
struct SetManagerRequest {
    manager_id: Option<Uuid>,
}

fn department_error_response(err: &DepartmentError) -> Response {
    (
        status_from(err.status_code()),
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// GET /departments - List all departments.
async fn list(State(state): State<AppState>, _auth: AuthUser) -> Response {
    let repo = DepartmentRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(departments) => (StatusCode::OK, Json(departments)).into_response(),
        Err(e) => department_error_response(&e),
    }
}

/// POST /departments - Create a department (admin only).
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateDepartmentRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let repo = DepartmentRepository::new((*state.db).clone());
    match repo.create(&payload.name, payload.manager_id).await {
        Ok(department) => {
            info!(department_id = %department.id, name = %department.name, "Department created");
            (StatusCode::CREATED, Json(department)).into_response()
        }
        Err(e) => department_error_response(&e),
    }
}

/// PUT /departments/{id}/manager - Set or clear the department manager (admin only).
async fn set_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<SetManagerRequest>>,
) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let manager_id = payload.and_then(|Json(p)| p.manager_id);
    let repo = DepartmentRepository::new((*state.db).clone());
    match repo.set_manager(id, manager_id).await {
        Ok(department) => (StatusCode::OK, Json(department)).into_response(),
        Err(e) => department_error_response(&e),
    }
}

/// DELETE /departments/{id} - Delete a department (admin only).
async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let admin = match require_admin(&state, &auth).await {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    let repo = DepartmentRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => {
            info!(department_id = %id, deleted_by = %admin.id, "Department deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => department_error_response(&e),
    }
}
