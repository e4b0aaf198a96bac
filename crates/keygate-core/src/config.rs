//! Keygate configuration management
//!
//! Handles configuration from environment variables with sensible defaults
//! for everything except the token signing secrets, which are required and
//! have no default. The loaded configuration is constructed once at startup
//! and passed by reference to the components that need it.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Token signing and lifetime configuration
    pub auth: AuthConfig,

    /// Database connection
    pub database: DatabaseConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails with [`ConfigError::MissingRequired`] when either signing
    /// secret (`TOKEN_KEY`, `REFRESHTOKEN_KEY`) is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port,
            })?;
        }

        // Signing secrets are load-bearing: no defaults, ever.
        config.auth.access_token_secret = std::env::var("TOKEN_KEY")
            .map_err(|_| ConfigError::MissingRequired("TOKEN_KEY".to_string()))?;
        config.auth.refresh_token_secret = std::env::var("REFRESHTOKEN_KEY")
            .map_err(|_| ConfigError::MissingRequired("REFRESHTOKEN_KEY".to_string()))?;

        if let Ok(days) = std::env::var("ACCESS_TOKEN_TTL_DAYS") {
            config.auth.access_token_ttl_days =
                days.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ACCESS_TOKEN_TTL_DAYS".to_string(),
                    value: days,
                })?;
        }
        if let Ok(days) = std::env::var("REFRESH_TOKEN_TTL_DAYS") {
            config.auth.refresh_token_ttl_days =
                days.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "REFRESH_TOKEN_TTL_DAYS".to_string(),
                    value: days,
                })?;
        }

        // Database (optional: without it the server runs on in-memory stores)
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = Some(url);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7000,
        }
    }
}

/// Token signing and lifetime configuration
///
/// The two secrets are distinct on purpose: access tokens and refresh
/// tokens are signed with different key material, so a refresh token can
/// never pass access-token verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens (required, no default)
    pub access_token_secret: String,

    /// HMAC secret for refresh tokens (required, no default)
    pub refresh_token_secret: String,

    /// Access token lifetime in days
    pub access_token_ttl_days: i64,

    /// Refresh token lifetime in days
    pub refresh_token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
            access_token_ttl_days: 10,
            refresh_token_ttl_days: 20,
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; `None` selects the in-memory stores
    pub url: Option<String>,

    /// Connection pool size
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.auth.access_token_ttl_days, 10);
        assert_eq!(config.auth.refresh_token_ttl_days, 20);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_secrets_have_no_default() {
        let config = AppConfig::default();
        assert!(config.auth.access_token_secret.is_empty());
        assert!(config.auth.refresh_token_secret.is_empty());
    }
}
