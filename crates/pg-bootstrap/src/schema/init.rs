//! Schema (re)initialization: a fixed four-phase drop/create workflow.

use super::{parse_create_table_statements, parse_create_type_enum_statements, CreateStatement};
use crate::error::{BootstrapError, Result};
use crate::pg::{is_undefined_object, is_undefined_table, SqlError, SqlExecutor};
use crate::progress::StepReporter;
use tracing::{debug, info};

/// Summary of a completed schema initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSummary {
    /// Number of enum types created.
    pub enum_types: usize,

    /// Number of tables created.
    pub tables: usize,
}

/// Drives a full schema reset against a SQL executor.
///
/// Four phases run strictly in sequence: drop tables, drop types, create
/// types, create tables. Tables are dropped before the types their columns
/// depend on; types are recreated before the tables that reference them.
/// During the drop phases an "object does not exist" error is treated as
/// success; any other failure aborts the run immediately, annotated with the
/// failing object's name.
///
/// The workflow is not transactional. A mid-run failure leaves all
/// already-executed statements in place.
pub struct SchemaInitializer<'a, E, R> {
    executor: &'a E,
    reporter: &'a R,
}

impl<'a, E: SqlExecutor, R: StepReporter> SchemaInitializer<'a, E, R> {
    /// Create an initializer over an executor and a progress reporter.
    pub fn new(executor: &'a E, reporter: &'a R) -> Self {
        Self { executor, reporter }
    }

    /// Reset the schema described by `schema`, dropping any pre-existing
    /// objects first.
    pub async fn run(&self, schema: &str) -> Result<InitSummary> {
        let enum_types = parse_create_type_enum_statements(schema);
        let tables = parse_create_table_statements(schema);

        info!(
            "Schema contains {} enum types and {} tables",
            enum_types.len(),
            tables.len()
        );

        self.drop_tables(&tables).await?;
        self.drop_types(&enum_types).await?;
        self.create_types(&enum_types).await?;
        self.create_tables(&tables).await?;

        Ok(InitSummary {
            enum_types: enum_types.len(),
            tables: tables.len(),
        })
    }

    async fn drop_tables(&self, tables: &[CreateStatement]) -> Result<()> {
        for stmt in tables {
            let label = format!("DROP TABLE   {} CASCADE", stmt.name);
            let sql = format!("DROP TABLE {} CASCADE", stmt.name);
            match self.step(&label, &sql).await {
                Ok(_) => {}
                Err(err) if is_undefined_table(&err) => {
                    debug!("Table '{}' does not exist, nothing to drop", stmt.name);
                }
                Err(source) => {
                    return Err(BootstrapError::DropTable {
                        table: stmt.name.clone(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    async fn drop_types(&self, enum_types: &[CreateStatement]) -> Result<()> {
        for stmt in enum_types {
            let label = format!("DROP TYPE    {}", stmt.name);
            let sql = format!("DROP TYPE {}", stmt.name);
            match self.step(&label, &sql).await {
                Ok(_) => {}
                Err(err) if is_undefined_object(&err) => {
                    debug!("Type '{}' does not exist, nothing to drop", stmt.name);
                }
                Err(source) => {
                    return Err(BootstrapError::DropType {
                        name: stmt.name.clone(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    async fn create_types(&self, enum_types: &[CreateStatement]) -> Result<()> {
        for stmt in enum_types {
            let label = format!("CREATE TYPE  {}", stmt.name);
            self.step(&label, &stmt.sql)
                .await
                .map_err(|source| BootstrapError::CreateType {
                    name: stmt.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    async fn create_tables(&self, tables: &[CreateStatement]) -> Result<()> {
        for stmt in tables {
            let label = format!("CREATE TABLE {}", stmt.name);
            self.step(&label, &stmt.sql)
                .await
                .map_err(|source| BootstrapError::CreateTable {
                    table: stmt.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Execute one statement wrapped in begin/success/failure progress marks.
    async fn step(&self, label: &str, sql: &str) -> std::result::Result<u64, SqlError> {
        self.reporter.begin(label);
        match self.executor.execute(sql).await {
            Ok(rows) => {
                self.reporter.success(label);
                Ok(rows)
            }
            Err(err) => {
                self.reporter.failure(label);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopReporter;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio_postgres::error::SqlState;

    const SCHEMA: &str = r#"
CREATE TYPE order_status AS ENUM ('pending', 'shipped');

CREATE TABLE customers (
    id serial PRIMARY KEY,
    name text NOT NULL
);

CREATE TABLE orders (
    id serial PRIMARY KEY,
    status order_status NOT NULL
);
"#;

    /// Executor that records every statement and fails the ones scripted in
    /// `failures`.
    struct ScriptedExecutor {
        log: Mutex<Vec<String>>,
        failures: HashMap<String, SqlError>,
    }

    impl ScriptedExecutor {
        fn new() -> Self {
            Self {
                log: Mutex::new(Vec::new()),
                failures: HashMap::new(),
            }
        }

        fn fail_on(mut self, sql: &str, code: &str) -> Self {
            self.failures.insert(
                sql.to_string(),
                SqlError::new(Some(SqlState::from_code(code)), format!("error on: {}", sql)),
            );
            self
        }

        fn fail_on_codeless(mut self, sql: &str) -> Self {
            self.failures
                .insert(sql.to_string(), SqlError::connection("connection reset"));
            self
        }

        fn executed(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SqlExecutor for ScriptedExecutor {
        async fn execute(&self, sql: &str) -> std::result::Result<u64, SqlError> {
            self.log.lock().unwrap().push(sql.to_string());
            match self.failures.get(sql) {
                Some(err) => Err(err.clone()),
                None => Ok(0),
            }
        }
    }

    /// Reporter that records labels with their outcome markers.
    struct RecordingReporter {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn new() -> Self {
            Self {
                lines: Mutex::new(Vec::new()),
            }
        }
    }

    impl StepReporter for RecordingReporter {
        fn begin(&self, _label: &str) {}
        fn success(&self, label: &str) {
            self.lines.lock().unwrap().push(format!("[+] {}", label));
        }
        fn failure(&self, label: &str) {
            self.lines.lock().unwrap().push(format!("[-] {}", label));
        }
    }

    #[tokio::test]
    async fn test_phases_run_in_order() {
        let executor = ScriptedExecutor::new();
        let reporter = NoopReporter;
        let summary = SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap();

        assert_eq!(
            summary,
            InitSummary {
                enum_types: 1,
                tables: 2,
            }
        );

        let executed = executor.executed();
        assert_eq!(executed.len(), 6);
        assert_eq!(executed[0], "DROP TABLE customers CASCADE");
        assert_eq!(executed[1], "DROP TABLE orders CASCADE");
        assert_eq!(executed[2], "DROP TYPE order_status");
        assert!(executed[3].starts_with("CREATE TYPE order_status AS ENUM"));
        assert!(executed[4].starts_with("CREATE TABLE customers"));
        assert!(executed[5].starts_with("CREATE TABLE orders"));
    }

    #[tokio::test]
    async fn test_empty_schema_is_a_no_op() {
        let executor = ScriptedExecutor::new();
        let reporter = NoopReporter;
        let summary = SchemaInitializer::new(&executor, &reporter)
            .run("-- nothing to do\n")
            .await
            .unwrap();

        assert_eq!(
            summary,
            InitSummary {
                enum_types: 0,
                tables: 0,
            }
        );
        assert!(executor.executed().is_empty());
    }

    #[tokio::test]
    async fn test_benign_absence_during_drops() {
        // Fresh database: every drop fails with "does not exist".
        let executor = ScriptedExecutor::new()
            .fail_on("DROP TABLE customers CASCADE", "42P01")
            .fail_on("DROP TABLE orders CASCADE", "42P01")
            .fail_on("DROP TYPE order_status", "42704");
        let reporter = NoopReporter;

        let summary = SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap();

        assert_eq!(summary.tables, 2);
        assert_eq!(executor.executed().len(), 6);
    }

    #[tokio::test]
    async fn test_wrong_benign_code_is_fatal_for_drop_table() {
        // 42704 is only benign when dropping a type, not a table.
        let executor = ScriptedExecutor::new().fail_on("DROP TABLE customers CASCADE", "42704");
        let reporter = NoopReporter;

        let err = SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap_err();

        match err {
            BootstrapError::DropTable { table, .. } => assert_eq!(table, "customers"),
            other => panic!("unexpected error: {:?}", other),
        }
        // Aborted on the first statement.
        assert_eq!(executor.executed().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_password_code_is_fatal() {
        let executor = ScriptedExecutor::new().fail_on("DROP TYPE order_status", "28P01");
        let reporter = NoopReporter;

        let err = SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap_err();

        match err {
            BootstrapError::DropType { name, .. } => assert_eq!(name, "order_status"),
            other => panic!("unexpected error: {:?}", other),
        }
        // Both table drops succeeded first, then the type drop aborted.
        assert_eq!(executor.executed().len(), 3);
    }

    #[tokio::test]
    async fn test_codeless_error_during_drop_is_fatal() {
        let executor = ScriptedExecutor::new().fail_on_codeless("DROP TABLE orders CASCADE");
        let reporter = NoopReporter;

        let err = SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap_err();

        match err {
            BootstrapError::DropTable { table, .. } => assert_eq!(table, "orders"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_table_failure_stops_remaining_creates() {
        let schema = "CREATE TABLE a (id int);\nCREATE TABLE b (id int);\nCREATE TABLE c (id int);\n";
        let executor = ScriptedExecutor::new().fail_on("CREATE TABLE b (id int);", "42601");
        let reporter = NoopReporter;

        let err = SchemaInitializer::new(&executor, &reporter)
            .run(schema)
            .await
            .unwrap_err();

        match err {
            BootstrapError::CreateTable { table, .. } => assert_eq!(table, "b"),
            other => panic!("unexpected error: {:?}", other),
        }

        let executed = executor.executed();
        // Three drops, then creates for a and b only.
        assert_eq!(executed.len(), 5);
        assert!(!executed.contains(&"CREATE TABLE c (id int);".to_string()));
    }

    #[tokio::test]
    async fn test_create_type_failure_stops_before_tables() {
        let executor = ScriptedExecutor::new().fail_on(
            "CREATE TYPE order_status AS ENUM ('pending', 'shipped');",
            "42601",
        );
        let reporter = NoopReporter;

        let err = SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap_err();

        match err {
            BootstrapError::CreateType { name, .. } => assert_eq!(name, "order_status"),
            other => panic!("unexpected error: {:?}", other),
        }

        let executed = executor.executed();
        assert!(!executed.iter().any(|sql| sql.starts_with("CREATE TABLE")));
    }

    #[tokio::test]
    async fn test_second_run_after_success_is_idempotent() {
        // First run: clean database, drops are benign absences.
        let first = ScriptedExecutor::new()
            .fail_on("DROP TABLE customers CASCADE", "42P01")
            .fail_on("DROP TABLE orders CASCADE", "42P01")
            .fail_on("DROP TYPE order_status", "42704");
        let reporter = NoopReporter;
        SchemaInitializer::new(&first, &reporter)
            .run(SCHEMA)
            .await
            .unwrap();

        // Second run: everything exists, every statement succeeds.
        let second = ScriptedExecutor::new();
        SchemaInitializer::new(&second, &reporter)
            .run(SCHEMA)
            .await
            .unwrap();
        assert_eq!(second.executed().len(), 6);
    }

    #[tokio::test]
    async fn test_benign_drop_still_reports_failure_marker() {
        let executor = ScriptedExecutor::new().fail_on("DROP TABLE customers CASCADE", "42P01");
        let reporter = RecordingReporter::new();

        SchemaInitializer::new(&executor, &reporter)
            .run(SCHEMA)
            .await
            .unwrap();

        let lines = reporter.lines.lock().unwrap().clone();
        assert_eq!(lines[0], "[-] DROP TABLE   customers CASCADE");
        assert_eq!(lines[1], "[+] DROP TABLE   orders CASCADE");
        assert_eq!(lines[2], "[+] DROP TYPE    order_status");
    }
}
