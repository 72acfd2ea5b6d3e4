//! SQLSTATE-based error classification.
//!
//! Drop phases of a schema reset treat exactly two conditions as benign:
//! `undefined_table` (42P01) when dropping a table, and `undefined_object`
//! (42704) when dropping a type. Both simply mean the object was never
//! created. Everything else, including an error that carries no SQLSTATE at
//! all (lost connection, pool exhaustion), is fatal.

use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Structured database execution error: a message plus the SQLSTATE code,
/// when the server reported one.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SqlError {
    code: Option<SqlState>,
    message: String,
}

impl SqlError {
    /// Create an error from an explicit SQLSTATE code and message.
    pub fn new(code: Option<SqlState>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a code-less error for connection and pool failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// The SQLSTATE code reported by the server, if any.
    pub fn code(&self) -> Option<&SqlState> {
        self.code.as_ref()
    }
}

impl From<tokio_postgres::Error> for SqlError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self {
            code: err.code().cloned(),
            message: err.to_string(),
        }
    }
}

/// Returns true for "undefined table" (SQLSTATE 42P01).
pub fn is_undefined_table(err: &SqlError) -> bool {
    err.code() == Some(&SqlState::UNDEFINED_TABLE)
}

/// Returns true for "undefined object" (SQLSTATE 42704), which the server
/// reports when dropping a type that does not exist.
pub fn is_undefined_object(err: &SqlError) -> bool {
    err.code() == Some(&SqlState::UNDEFINED_OBJECT)
}

/// Returns true for "invalid password" (SQLSTATE 28P01).
pub fn is_invalid_password(err: &SqlError) -> bool {
    err.code() == Some(&SqlState::INVALID_PASSWORD)
}
