//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `STAYBOOK__*` environment variables. Each sub-module
//! represents a logical configuration section. The loaded [`AppConfig`] is
//! passed explicitly into every component constructor; nothing reads the
//! process environment after startup.

pub mod app;
pub mod auth;
pub mod booking;
pub mod database;
pub mod logging;
pub mod payment;
pub mod social;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::booking::BookingConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::payment::PaymentConfig;
pub use self::social::SocialConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Reservation workflow settings.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Payment gateway settings.
    #[serde(default)]
    pub payment: PaymentConfig,
    /// Social login provider settings.
    #[serde(default)]
    pub social: SocialConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with `STAYBOOK__`
    /// (for example `STAYBOOK__AUTH__JWT_SECRET`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STAYBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations that would make the server insecure or unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.is_empty() || self.auth.jwt_refresh_secret.is_empty() {
            return Err(AppError::configuration("JWT secrets must not be empty"));
        }
        if self.auth.jwt_secret == self.auth.jwt_refresh_secret {
            return Err(AppError::configuration(
                "Access and refresh tokens must use different secrets",
            ));
        }
        if self.database.url.is_empty() {
            return Err(AppError::configuration("database.url is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.access_ttl_days, 7);
        assert_eq!(config.auth.refresh_ttl_days, 30);
        assert!(config.booking.confirm_on_create);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shared_secret() {
        let mut config = AppConfig::default();
        config.auth.jwt_refresh_secret = config.auth.jwt_secret.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let parsed: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "port": 9090 },
            "booking": { "confirm_on_create": false }
        }))
        .expect("config should deserialize");

        assert_eq!(parsed.server.port, 9090);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert!(!parsed.booking.confirm_on_create);
        assert_eq!(parsed.payment.toss_api_base, "https://api.tosspayments.com");
    }
}
