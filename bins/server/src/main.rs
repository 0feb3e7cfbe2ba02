//! Claimdesk API Server
//!
//! Main entry point for the Claimdesk backend service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use claimdesk_api::{AppState, PortalSettings, create_router};
use claimdesk_db::{UserRepository, connect};
use claimdesk_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claimdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Resolve the default approver account. Accountability must not depend
    // on row-insertion order, so the account is named in configuration and
    // resolved once at boot.
    let user_repo = UserRepository::new(db.clone());
    let default_approver = user_repo
        .find_by_email(&config.portal.default_approver_email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to look up default approver: {e}"))?
        .with_context(|| {
            format!(
                "Default approver {} not found; create the account or run the seeder",
                config.portal.default_approver_email
            )
        })?;
    info!(
        user_id = %default_approver.id,
        email = %default_approver.email,
        "Resolved default approver"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        portal: Arc::new(PortalSettings {
            default_approver: default_approver.id,
            fallback_path: config.portal.fallback_path.clone(),
            company_email_domain: config.portal.company_email_domain.clone(),
        }),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
