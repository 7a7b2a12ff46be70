use crate::core::{HarnessError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;
use std::time::Duration;

/// Backing store settings, only needed for out-of-band fixture teardown
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| HarnessError::configuration("DATABASE_URL not set"))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| {
                    HarnessError::configuration("Invalid DATABASE_MAX_CONNECTIONS")
                })?,
        })
    }

    /// Create a PostgreSQL connection pool
    pub async fn create_pool(&self) -> Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(HarnessError::Database)
    }
}
