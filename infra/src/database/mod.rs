//! Database module - MySQL implementations using SQLx

pub mod mysql;

pub use mysql::MySqlUserRepository;

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use oa_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Build the shared MySQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    info!(
        max_connections = config.max_connections,
        "Connecting to MySQL"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .connect(&config.url)
        .await?;

    info!("MySQL connection pool established");
    Ok(pool)
}
