//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so a partial file is valid.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;
pub mod tree;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;
pub use self::tree::TreeConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Bearer token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Uploaded file location.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Folder tree query settings.
    #[serde(default)]
    pub tree: TreeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `EDUDASH__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EDUDASH")
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

    /// Reject settings that would make the server misbehave at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tree.max_depth == 0 {
            return Err(AppError::configuration("tree.max_depth must be at least 1"));
        }
        match self.database.provider.as_str() {
            "postgres" | "memory" => {}
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown database provider: '{other}'. Supported: postgres, memory"
                )));
            }
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tree.max_depth, 4);
        assert_eq!(config.database.provider, "postgres");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.tree.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.database.provider = "sqlite".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("sqlite"));
    }
}
