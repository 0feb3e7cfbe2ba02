//! Access audit middleware.
//!
//! Every authenticated request leaves an `accessed` row in the audit log,
//! recording the path and the caller's address. The write happens off the
//! request path; a failed insert is logged and never fails the request.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::warn;

use crate::AppState;
use claimdesk_db::AuditLogRepository;
use claimdesk_shared::Claims;

/// Resolves the caller's address from forwarding headers or the socket.
fn source_addr(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |info| info.0.ip().to_string())
}

/// Records an access audit row for each authenticated request.
///
/// Must be layered inside `auth_middleware`, so the claims are already in
/// the request extensions.
pub async fn access_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let user_id = request.extensions().get::<Claims>().map(Claims::user_id);
    let path = request.uri().path().to_string();
    let addr = source_addr(&request);

    if let Some(user_id) = user_id {
        let db = (*state.db).clone();
        tokio::spawn(async move {
            let repo = AuditLogRepository::new(db);
            if let Err(e) = repo.append_access(user_id, &path, &addr).await {
                warn!(error = %e, %path, "Failed to record access audit row");
            }
        });
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_forwarded_header_wins() {
        let request = Request::builder()
            .uri("/api/v1/reimbursements")
            .header("x-forwarded-for", "10.1.2.3, 172.16.0.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(source_addr(&request), "10.1.2.3");
    }

    #[test]
    fn test_unknown_without_socket_info() {
        let request = Request::builder()
            .uri("/api/v1/reimbursements")
            .body(Body::empty())
            .unwrap();

        assert_eq!(source_addr(&request), "unknown");
    }
}
