//! PostgreSQL connection pool and the SQL execution seam.

mod codes;

pub use codes::{is_invalid_password, is_undefined_object, is_undefined_table, SqlError};

use crate::config::DatabaseConfig;
use crate::error::{BootstrapError, Result};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{debug, info};

/// Capability to execute a single SQL statement.
///
/// The schema initializer drives every drop and create through this trait, so
/// tests can substitute a scripted executor for a live connection.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute one statement, returning the number of rows affected.
    async fn execute(&self, sql: &str) -> std::result::Result<u64, SqlError>;
}

/// PostgreSQL connection pool.
pub struct PgPool {
    pool: Pool,
    config: DatabaseConfig,
}

impl PgPool {
    /// Connect to PostgreSQL and verify the connection with `SELECT 1`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let mgr = Manager::from_config(config.pg_config(), NoTls, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(config.pool_size)
            .build()
            .map_err(|e| {
                BootstrapError::pool(
                    format!("Failed to create pool: {}", e),
                    config.connection_string(),
                )
            })?;

        // Test connection
        let client = pool.get().await.map_err(|e| {
            BootstrapError::pool(
                format!("Failed to get connection: {}", e),
                config.connection_string(),
            )
        })?;

        client.simple_query("SELECT 1").await?;

        info!(
            "Connected to PostgreSQL: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self {
            pool,
            config: config.clone(),
        })
    }

    /// The configuration this pool was built from.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

#[async_trait]
impl SqlExecutor for PgPool {
    async fn execute(&self, sql: &str) -> std::result::Result<u64, SqlError> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| SqlError::connection(format!("Failed to get connection: {}", e)))?;

        debug!("Executing: {}", sql);
        client.execute(sql, &[]).await.map_err(SqlError::from)
    }
}
