//! Schema parsing: extraction of `CREATE TABLE` and `CREATE TYPE ... AS ENUM`
//! statements from a raw SQL schema file.

mod init;

pub use init::{InitSummary, SchemaInitializer};

use once_cell::sync::Lazy;
use regex::Regex;

static CREATE_TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(CREATE TABLE (.*) \((?s:.*?)\);)").unwrap());

static CREATE_TYPE_ENUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(CREATE TYPE (.*) AS ENUM \((?s:.*?)\);)").unwrap());

/// A named SQL CREATE statement extracted from a schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStatement {
    /// The object name following `CREATE TABLE` / `CREATE TYPE`.
    pub name: String,

    /// The full statement text, including the trailing semicolon.
    pub sql: String,
}

/// Extract all `CREATE TABLE name (...)` statements, in order of appearance.
///
/// A statement starts at the keywords, continues through a parenthesized body
/// that may span lines, and ends at the first `);`. Matching is permissive:
/// text that does not fit this shape, including an unterminated body, is
/// silently skipped rather than reported.
pub fn parse_create_table_statements(schema: &str) -> Vec<CreateStatement> {
    extract(&CREATE_TABLE_RE, schema)
}

/// Extract all `CREATE TYPE name AS ENUM (...)` statements, in order of
/// appearance. Same matching rules as [`parse_create_table_statements`].
pub fn parse_create_type_enum_statements(schema: &str) -> Vec<CreateStatement> {
    extract(&CREATE_TYPE_ENUM_RE, schema)
}

fn extract(re: &Regex, schema: &str) -> Vec<CreateStatement> {
    re.captures_iter(schema)
        .map(|caps| CreateStatement {
            name: caps[2].to_string(),
            sql: caps[1].to_string(),
        })
        .collect()
}
