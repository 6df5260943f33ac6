use intake_core::config::DatabaseConfig;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

/// Connect to the intake database. Acquisition is bounded so a
/// misconfigured or unreachable backend fails within the configured
/// timeout instead of blocking the pipeline.
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlPool, DbError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    info!("Connected to intake database");
    Ok(pool)
}

/// Build the pool without connecting. The first acquisition happens on the
/// first query, so a misconfigured backend surfaces as a per-call failure
/// at the store boundary rather than at startup.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<MySqlPool, DbError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy(&config.url)?;
    Ok(pool)
}
