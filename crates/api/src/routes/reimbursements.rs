//! Reimbursement claim routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use claimdesk_core::claim::{Category, ClaimError, validate_claim};
use claimdesk_db::{
    AuditLogRepository, ReimbursementRepository,
    repositories::reimbursement::{
        SubmitClaimInput, UpdateClaimInput, status_counts,
    },
};

use crate::{AppState, middleware::auth::AuthUser};

use super::{claim_error_response, database_error_response, require_admin};

/// Creates the reimbursement router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reimbursements", post(submit).get(list))
        .route(
            "/reimbursements/{id}",
            get(detail).patch(update).delete(remove),
        )
        .route("/reimbursements/{id}/approve", post(approve))
        .route("/reimbursements/{id}/decline", post(decline))
}

/// Request body for submitting a claim.
#[derive(Debug, Deserialize)]
struct SubmitRequest {
    category: Option<String>,
    amount: Option<Decimal>,
    description: String,
    expense_date: NaiveDate,
    document_ref: Option<String>,
}

/// Request body for editing a pending claim.
#[derive(Debug, Deserialize, Default)]
struct UpdateRequest {
    category: Option<String>,
    amount: Option<Decimal>,
    description: Option<String>,
    expense_date: Option<NaiveDate>,
    document_ref: Option<String>,
}

/// Request body for a decision.
#[derive(Debug, Deserialize, Default)]
struct DecisionRequest {
    comments: Option<String>,
}

/// A supplied-but-invalid field on a claim edit.
#[derive(Debug, PartialEq, Eq)]
enum UpdateFieldError {
    UnknownCategory(String),
    NonPositiveAmount,
}

impl UpdateFieldError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Self::NonPositiveAmount => "INVALID_AMOUNT",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::UnknownCategory(raw) => format!("Unknown category: {raw}"),
            Self::NonPositiveAmount => "Amount must be positive".to_string(),
        }
    }
}

/// Validates the optional fields of an edit request. Absent fields stay
/// absent; a field that is supplied must be valid.
fn parse_update_fields(
    category: Option<&str>,
    amount: Option<Decimal>,
) -> Result<(Option<Category>, Option<Decimal>), UpdateFieldError> {
    let category = match category {
        Some(raw) => Some(
            Category::parse(raw)
                .ok_or_else(|| UpdateFieldError::UnknownCategory(raw.to_string()))?,
        ),
        None => None,
    };
    if amount.is_some_and(|a| a <= Decimal::ZERO) {
        return Err(UpdateFieldError::NonPositiveAmount);
    }
    Ok((category, amount))
}

/// POST /reimbursements - Submit a new claim.
async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SubmitRequest>,
) -> Response {
    // An unknown category or non-positive amount is treated the same as an
    // absent field.
    let category = payload.category.as_deref().and_then(Category::parse);
    let amount = payload.amount.filter(|a| *a > Decimal::ZERO);

    if let Err(e) = validate_claim(category, amount) {
        return claim_error_response(&state, &e);
    }
    let (Some(category), Some(amount)) = (category, amount) else {
        // validate_claim rejects absent fields above.
        return claim_error_response(&state, &ClaimError::CategoryRequired);
    };

    let repo = ReimbursementRepository::new((*state.db).clone());
    let result = repo
        .submit(
            auth.user_id(),
            SubmitClaimInput {
                category,
                amount,
                description: payload.description,
                expense_date: payload.expense_date,
                document_ref: payload.document_ref,
            },
            state.portal.default_approver,
        )
        .await;

    match result {
        Ok(claim) => {
            info!(claim_id = %claim.id, employee_id = %claim.employee_id, "Claim submitted");
            (StatusCode::CREATED, Json(claim)).into_response()
        }
        Err(e) => claim_error_response(&state, &e),
    }
}

/// GET /reimbursements - List visible claims with status counts.
async fn list(State(state): State<AppState>, auth: AuthUser) -> Response {
    let repo = ReimbursementRepository::new((*state.db).clone());

    match repo.list_visible(auth.user_id()).await {
        Ok(claims) => {
            let counts = status_counts(&claims);
            (
                StatusCode::OK,
                Json(json!({ "claims": claims, "counts": counts })),
            )
                .into_response()
        }
        Err(e) => claim_error_response(&state, &e),
    }
}

/// GET /reimbursements/{id} - Claim detail with its audit trail.
async fn detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = ReimbursementRepository::new((*state.db).clone());

    let claim = match repo.get_visible(id, auth.user_id()).await {
        Ok(claim) => claim,
        Err(e) => return claim_error_response(&state, &e),
    };

    let audit_repo = AuditLogRepository::new((*state.db).clone());
    let trail = match audit_repo.list_for_reimbursement(claim.id).await {
        Ok(trail) => trail,
        Err(e) => return database_error_response(&e.to_string()),
    };

    (
        StatusCode::OK,
        Json(json!({ "claim": claim, "trail": trail })),
    )
        .into_response()
}

/// PATCH /reimbursements/{id} - Edit a pending claim.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> Response {
    let (category, amount) = match parse_update_fields(payload.category.as_deref(), payload.amount)
    {
        Ok(fields) => fields,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": e.error_code(),
                    "message": e.message()
                })),
            )
                .into_response();
        }
    };

    let repo = ReimbursementRepository::new((*state.db).clone());
    let result = repo
        .update(
            id,
            auth.user_id(),
            UpdateClaimInput {
                category,
                amount,
                description: payload.description,
                expense_date: payload.expense_date,
                document_ref: payload.document_ref,
            },
        )
        .await;

    match result {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(e) => claim_error_response(&state, &e),
    }
}

/// POST /reimbursements/{id}/approve - Approve a pending claim.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<DecisionRequest>>,
) -> Response {
    let comments = payload.and_then(|Json(p)| p.comments);
    let repo = ReimbursementRepository::new((*state.db).clone());

    match repo.approve(id, auth.user_id(), comments).await {
        Ok(claim) => {
            info!(claim_id = %claim.id, decided_by = %auth.user_id(), "Claim approved");
            (StatusCode::OK, Json(claim)).into_response()
        }
        Err(e) => claim_error_response(&state, &e),
    }
}

/// POST /reimbursements/{id}/decline - Decline a pending claim.
async fn decline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<DecisionRequest>>,
) -> Response {
    let comments = payload.and_then(|Json(p)| p.comments);
    let repo = ReimbursementRepository::new((*state.db).clone());

    match repo.decline(id, auth.user_id(), comments).await {
        Ok(claim) => {
            info!(claim_id = %claim.id, decided_by = %auth.user_id(), "Claim declined");
            (StatusCode::OK, Json(claim)).into_response()
        }
        Err(e) => claim_error_response(&state, &e),
    }
}

/// DELETE /reimbursements/{id} - Delete a claim (admin only).
async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let admin = match require_admin(&state, &auth).await {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    let repo = ReimbursementRepository::new((*state.db).clone());
    match repo.delete(id, admin.id).await {
        Ok(()) => {
            info!(claim_id = %id, deleted_by = %admin.id, "Claim deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => claim_error_response(&state, &e),
    }
}

#[cfg(test)]
mod update_field_tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_absent_fields_pass_through() {
        assert_eq!(parse_update_fields(None, None), Ok((None, None)));
    }

    #[test]
    fn test_valid_fields_are_parsed() {
        let parsed = parse_update_fields(Some("travel"), Some(dec!(99.50)));
        assert_eq!(parsed, Ok((Some(Category::Travel), Some(dec!(99.50)))));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = parse_update_fields(Some("snacks"), None).unwrap_err();
        assert_eq!(err, UpdateFieldError::UnknownCategory("snacks".to_string()));
        assert_eq!(err.error_code(), "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        for amount in [dec!(0), dec!(-5)] {
            let err = parse_update_fields(None, Some(amount)).unwrap_err();
            assert_eq!(err, UpdateFieldError::NonPositiveAmount);
            assert_eq!(err.error_code(), "INVALID_AMOUNT");
        }
    }
}
