//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Schema bootstrap settings.
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// PostgreSQL connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 5432).
    #[serde(default = "default_pg_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Connection pool size (default: 1; statements are issued one at a time).
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

/// Schema file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Path to the SQL schema file (default: schema.sql).
    #[serde(default = "default_schema_file")]
    pub file: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            file: default_schema_file(),
        }
    }
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pool_size() -> usize {
    1
}

fn default_schema_file() -> PathBuf {
    PathBuf::from("schema.sql")
}
