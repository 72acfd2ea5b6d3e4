//! Nullable-value constructors.
//!
//! Callers binding optional columns often hold a plain value where the zero
//! value means "not set". These helpers map that convention onto `Option`,
//! which `tokio-postgres` encodes as SQL NULL.

/// Returns `None` (SQL NULL) for 0, `Some(value)` otherwise.
pub fn nullable_int(value: i64) -> Option<i64> {
    (value != 0).then_some(value)
}

/// Returns `None` (SQL NULL) for an empty string, `Some` otherwise.
pub fn nullable_string(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
