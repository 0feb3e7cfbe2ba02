//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Portal policy configuration.
    pub portal: PortalConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    28800 // 8 hours, one working day
}

/// Portal policy configuration.
///
/// The default approver is the admin account that becomes the accountable
/// party for any employee or claim without a resolvable manager. It is an
/// explicit deployment-time setting rather than a "first admin row" lookup,
/// so accountability does not depend on row-insertion order.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Email of the admin account used as the fallback accountable party.
    pub default_approver_email: String,
    /// Path unauthorized requests are redirected to.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
    /// Required email domain for new accounts (None = any domain).
    #[serde(default)]
    pub company_email_domain: Option<String>,
}

fn default_fallback_path() -> String {
    "/dashboard".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLAIMDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_fallback_path(), "/dashboard");
    }

    #[test]
    fn test_portal_config_deserializes_with_defaults() {
        let portal: PortalConfig = serde_json::from_str(
            r#"{ "default_approver_email": "admin@example.com" }"#,
        )
        .unwrap();
        assert_eq!(portal.default_approver_email, "admin@example.com");
        assert_eq!(portal.fallback_path, "/dashboard");
        assert!(portal.company_email_domain.is_none());
    }
}
