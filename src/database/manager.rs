use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Could not connect after {attempts} attempts: {source}")]
    ConnectFailed {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the bounded Postgres pool and bootstraps its schema
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect with a fixed number of attempts, pausing between them. The pool
    /// is bounded by `max_connections`; callers queue for a free connection
    /// until `acquire_timeout_secs` elapses.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let display_url = Self::redacted_url(url)?;

        let attempts = config.connect_retries.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
                .connect(url)
                .await;

            match result {
                Ok(pool) => {
                    info!("Connected to {} (max {} connections)", display_url, config.max_connections);
                    return Ok(pool);
                }
                Err(e) if attempt < attempts => {
                    warn!("Database connection failed. Retry {}/{}: {}", attempt, attempts, e);
                    tokio::time::sleep(Duration::from_secs(config.retry_delay_secs)).await;
                }
                Err(e) => {
                    return Err(DatabaseError::ConnectFailed {
                        attempts,
                        source: e,
                    })
                }
            }
        }
    }

    /// Apply the embedded migrations in `./migrations`
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Connection string safe for logs (password removed)
    fn redacted_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.to_string())
    }
}
