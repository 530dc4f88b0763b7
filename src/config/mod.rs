//! Application Configuration
//!
//! Environment-driven configuration for the server, database, token
//! signing, and the seal trust model.

use crate::database::DatabaseConfig;
use crate::service::SealMode;
use crate::utils::error::{AppError, AppResult};

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty means same-origin only
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            allowed_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub seal_mode: SealMode,
}

impl AppConfig {
    /// Load configuration from the environment and validate it.
    ///
    /// `DATABASE_URL` and a non-empty `JWT_SECRET` are required; everything
    /// else has defaults. `SEAL_MODE` defaults to `authorized`.
    pub fn from_env() -> AppResult<Self> {
        let database = DatabaseConfig::from_env()
            .map_err(|_| AppError::Configuration("DATABASE_URL is not set".to_string()))?;

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();

        let seal_mode = match std::env::var("SEAL_MODE") {
            Ok(value) => SealMode::parse(value.trim()).ok_or_else(|| {
                AppError::Configuration(format!(
                    "SEAL_MODE must be 'open' or 'authorized', got '{}'",
                    value
                ))
            })?,
            Err(_) => SealMode::default(),
        };

        let config = Self {
            server: ServerConfig::from_env(),
            database,
            jwt_secret,
            seal_mode,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::Configuration(
                "JWT_SECRET must be set to a non-empty value".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "PORT must be a valid port number".to_string(),
            ));
        }
        Ok(())
    }
}
