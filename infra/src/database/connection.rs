//! Connection pool management for MySQL.

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use bh_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Managed MySQL connection pool
///
/// Every persistence call through this pool carries a bounded deadline: the
/// acquire timeout caps how long a request may wait for a connection, so a
/// stalled database surfaces as an error instead of an unbounded hang.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    /// Total connections currently open
    pub size: u32,
    /// Connections currently idle
    pub idle: usize,
}

impl DatabasePool {
    /// Connect a new pool from database configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            acquire_timeout_secs = config.connect_timeout,
            "Connected database pool"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Access the underlying SQLx pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verify the database answers a trivial query
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Current pool usage
    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        }
    }

    /// Close all connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
