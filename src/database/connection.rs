//! Database Connection Management

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Database connection pool type alias for convenience
pub type DatabasePool = PgPool;

/// Connection settings for the PostgreSQL pool.
///
/// Only the knobs this service actually tunes; everything else stays at
/// the sqlx defaults.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/sealbio".to_string(),
            max_connections: 20,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl DatabaseConfig {
    /// Read connection settings from the environment.
    ///
    /// `DATABASE_URL` is required; `DB_MAX_CONNECTIONS` and
    /// `DB_CONNECT_TIMEOUT` (seconds) are optional overrides.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let url = std::env::var("DATABASE_URL")?;
        let defaults = Self::default();

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_connections);

        let acquire_timeout = std::env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.acquire_timeout);

        Ok(Self {
            url,
            max_connections,
            acquire_timeout,
        })
    }

    /// Open a connection pool with these settings
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.url)
            .await
    }
}
