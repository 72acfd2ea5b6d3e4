//! Error types for schema bootstrap operations.

use crate::pg::SqlError;
use thiserror::Error;

/// Exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for database errors, including any phase of a schema reset.
pub const EXIT_DB_ERROR: u8 = 2;

/// Exit code for IO errors (missing config or schema file, etc.)
pub const EXIT_IO_ERROR: u8 = 7;

/// Exit code when the operator declines the confirmation prompt.
pub const EXIT_CANCELLED: u8 = 130;

/// Main error type for bootstrap operations.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error outside the phased workflow (connection probe, etc.)
    #[error("Database error: {0}")]
    Db(#[from] tokio_postgres::Error),

    /// Connection pool error with context
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// Dropping a table failed with a non-benign error
    #[error("Failed to drop table '{table}': {source}")]
    DropTable { table: String, source: SqlError },

    /// Dropping an enum type failed with a non-benign error
    #[error("Failed to drop type '{name}': {source}")]
    DropType { name: String, source: SqlError },

    /// Creating an enum type failed
    #[error("Failed to create type '{name}': {source}")]
    CreateType { name: String, source: SqlError },

    /// Creating a table failed
    #[error("Failed to create table '{table}': {source}")]
    CreateTable { table: String, source: SqlError },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The operator declined the confirmation prompt
    #[error("Bootstrap cancelled")]
    Cancelled,
}

impl BootstrapError {
    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl Into<String>, context: impl Into<String>) -> Self {
        BootstrapError::Pool {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BootstrapError::Config(_) | BootstrapError::Yaml(_) => EXIT_CONFIG_ERROR,
            BootstrapError::Io(_) => EXIT_IO_ERROR,
            BootstrapError::Cancelled => EXIT_CANCELLED,
            _ => EXIT_DB_ERROR,
        }
    }
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
