//! Staff management routes (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use claimdesk_core::auth::hash_password;
use claimdesk_core::org::{Role, resolve_manager};
use claimdesk_db::{
    UserRepository,
    entities::users,
    repositories::user::{CreateUserInput, UserError, db_role_to_core},
};

use crate::{AppState, middleware::auth::AuthUser};

use super::{database_error_response, require_admin, status_from};

/// Creates the staff management router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/{id}", axum::routing::delete(remove))
        .route("/employees/{id}/promote", post(promote))
        .route("/employees/{id}/manager", put(assign_manager))
        .route("/managers", get(list_managers))
}

/// Request body for creating an employee.
#[derive(Debug, Deserialize)]
struct CreateEmployeeRequest {
    email: String,
    password: String,
    full_name: String,
    #[serde(default)]
    role: Option<String>,
    department_id: Option<Uuid>,
    manager_id: Option<Uuid>,
}

/// Request body for assigning a manager.
#[derive(Debug, Deserialize, Default)]
struct AssignManagerRequest {
    manager_id: Option<Uuid>,
}

/// Employee summary returned by list endpoints.
#[derive(Debug, Serialize)]
struct EmployeeSummary {
    id: Uuid,
    email: String,
    full_name: String,
    role: String,
    department_id: Option<Uuid>,
    manager_id: Option<Uuid>,
    /// The resolved accountable party: the assigned manager, or the
    /// configured default approver when none is assigned.
    manager_of_record: Uuid,
}

fn summarize(user: &users::Model, default_approver: Uuid) -> EmployeeSummary {
    EmployeeSummary {
        id: user.id,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        role: db_role_to_core(&user.role).as_str().to_string(),
        department_id: user.department_id,
        manager_id: user.manager_id,
        manager_of_record: resolve_manager(user.manager_id, default_approver),
    }
}

/// Checks a new account's email against the required company domain.
fn email_domain_allowed(email: &str, company_domain: Option<&str>) -> bool {
    match company_domain {
        Some(domain) => email
            .rsplit_once('@')
            .is_some_and(|(_, d)| d.eq_ignore_ascii_case(domain)),
        None => true,
    }
}

fn user_error_response(err: &UserError) -> Response {
    (
        status_from(err.status_code()),
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// GET /employees - List all non-admin staff.
async fn list(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.list_staff().await {
        Ok(staff) => {
            let summaries: Vec<_> = staff
                .iter()
                .map(|u| summarize(u, state.portal.default_approver))
                .collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => user_error_response(&e),
    }
}

/// GET /managers - List all managers.
async fn list_managers(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.list_managers().await {
        Ok(managers) => {
            let summaries: Vec<_> = managers
                .iter()
                .map(|u| summarize(u, state.portal.default_approver))
                .collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => user_error_response(&e),
    }
}

/// POST /employees - Create a staff account.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    if !email_domain_allowed(&payload.email, state.portal.company_email_domain.as_deref()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "EMAIL_DOMAIN_NOT_ALLOWED",
                "message": "Email must use the company domain"
            })),
        )
            .into_response();
    }

    let role = match payload.role.as_deref() {
        None => Role::Employee,
        Some(s) => match Role::parse(s) {
            Some(role) => role,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "INVALID_ROLE",
                        "message": format!("Unknown role: {s}")
                    })),
                )
                    .into_response();
            }
        },
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => return database_error_response(&e.to_string()),
    };

    let repo = UserRepository::new((*state.db).clone());
    let result = repo
        .create(CreateUserInput {
            email: payload.email,
            password_hash,
            full_name: payload.full_name,
            role,
            department_id: payload.department_id,
            manager_id: payload.manager_id,
        })
        .await;

    match result {
        Ok(user) => {
            info!(user_id = %user.id, role = %role, "Staff account created");
            (
                StatusCode::CREATED,
                Json(summarize(&user, state.portal.default_approver)),
            )
                .into_response()
        }
        Err(e) => user_error_response(&e),
    }
}

/// POST /employees/{id}/promote - Promote an employee to manager.
async fn promote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.promote_to_manager(id).await {
        Ok(user) => {
            info!(user_id = %user.id, "Employee promoted to manager");
            (
                StatusCode::OK,
                Json(summarize(&user, state.portal.default_approver)),
            )
                .into_response()
        }
        Err(e) => user_error_response(&e),
    }
}

/// PUT /employees/{id}/manager - Assign or clear a direct manager.
async fn assign_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<AssignManagerRequest>>,
) -> Response {
    if let Err(response) = require_admin(&state, &auth).await {
        return response;
    }

    let manager_id = payload.and_then(|Json(p)| p.manager_id);
    let repo = UserRepository::new((*state.db).clone());
    match repo.assign_manager(id, manager_id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(summarize(&user, state.portal.default_approver)),
        )
            .into_response(),
        Err(e) => user_error_response(&e),
    }
}

/// DELETE /employees/{id} - Delete a staff account and their claims.
async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let admin = match require_admin(&state, &auth).await {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo.delete_employee(id, &admin.full_name).await {
        Ok(()) => {
            info!(user_id = %id, deleted_by = %admin.id, "Staff account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => user_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_db::entities::sea_orm_active_enums::UserRole;

    fn staff_member(manager_id: Option<Uuid>) -> users::Model {
        let now = chrono::Utc::now().into();
        users::Model {
            id: Uuid::new_v4(),
            email: "sam@corp.example".to_string(),
            password_hash: String::new(),
            full_name: "Sam".to_string(),
            role: UserRole::Employee,
            department_id: None,
            manager_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_manager_of_record_follows_reassignment() {
        let default_approver = Uuid::new_v4();
        let new_manager = Uuid::new_v4();

        let mut user = staff_member(None);
        assert_eq!(
            summarize(&user, default_approver).manager_of_record,
            default_approver
        );

        // The manager-of-record is derived from the user row, so a
        // reassignment is reflected everywhere the summary is built.
        user.manager_id = Some(new_manager);
        assert_eq!(
            summarize(&user, default_approver).manager_of_record,
            new_manager
        );
    }

    #[test]
    fn test_email_domain_allowed_without_restriction() {
        assert!(email_domain_allowed("a@anything.io", None));
    }

    #[test]
    fn test_email_domain_enforced() {
        assert!(email_domain_allowed("a@corp.example", Some("corp.example")));
        assert!(email_domain_allowed("a@CORP.EXAMPLE", Some("corp.example")));
        assert!(!email_domain_allowed("a@elsewhere.io", Some("corp.example")));
        assert!(!email_domain_allowed("no-at-sign", Some("corp.example")));
    }
}
