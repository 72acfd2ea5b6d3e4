//! # pg-bootstrap
//!
//! Helpers for bootstrapping a PostgreSQL schema from a raw DDL file:
//!
//! - **Statement extraction**: pull `CREATE TABLE` and `CREATE TYPE ... AS ENUM`
//!   definitions out of a schema file, in order of appearance.
//! - **Schema initialization**: drop and recreate the extracted objects in
//!   dependency order (tables dropped before types, types created before the
//!   tables that reference them).
//! - **Error classification**: SQLSTATE-based checks for benign "does not
//!   exist" conditions during drops.
//! - **Progress reporting**: `[ ]` / `[+]` / `[-]` console markers for
//!   interactive runs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pg_bootstrap::{Config, ConsoleReporter, PgPool, SchemaInitializer};
//!
//! #[tokio::main]
//! async fn main() -> pg_bootstrap::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let schema = std::fs::read_to_string(&config.schema.file)?;
//!
//!     let pool = PgPool::connect(&config.database).await?;
//!     let reporter = ConsoleReporter;
//!     let summary = SchemaInitializer::new(&pool, &reporter).run(&schema).await?;
//!
//!     println!("Created {} types, {} tables", summary.enum_types, summary.tables);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pg;
pub mod progress;
pub mod schema;
pub mod value;

// Re-exports for convenient access
pub use config::{Config, DatabaseConfig, SchemaConfig};
pub use error::{BootstrapError, Result};
pub use pg::{
    is_invalid_password, is_undefined_object, is_undefined_table, PgPool, SqlError, SqlExecutor,
};
pub use progress::{ConsoleReporter, NoopReporter, StepReporter};
pub use schema::{
    parse_create_table_statements, parse_create_type_enum_statements, CreateStatement, InitSummary,
    SchemaInitializer,
};
pub use value::{nullable_int, nullable_string};
