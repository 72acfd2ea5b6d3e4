//! pg-bootstrap CLI - reset a PostgreSQL schema from a raw DDL file.

use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use pg_bootstrap::{BootstrapError, Config, ConsoleReporter, PgPool, SchemaInitializer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "pg-bootstrap")]
#[command(about = "Reset a PostgreSQL schema from a raw DDL file")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop and recreate all enum types and tables from the schema file
    Init {
        /// Override the schema file path from the config
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Skip the interactive confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Test the database connection
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), BootstrapError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(BootstrapError::Config)?;

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Init { schema, yes } => {
            if let Some(path) = schema {
                config.schema.file = path;
            }

            let schema_sql = std::fs::read_to_string(&config.schema.file)?;

            if !yes && !confirm_reset(&config)? {
                return Err(BootstrapError::Cancelled);
            }

            let pool = PgPool::connect(&config.database).await?;
            let reporter = ConsoleReporter;
            let summary = SchemaInitializer::new(&pool, &reporter)
                .run(&schema_sql)
                .await?;

            println!("\nSchema initialized!");
            println!("  Enum types: {}", summary.enum_types);
            println!("  Tables: {}", summary.tables);
        }

        Commands::HealthCheck => {
            let pool = PgPool::connect(&config.database).await?;
            println!(
                "Database connection OK ({})",
                pool.config().connection_string()
            );
        }
    }

    Ok(())
}

/// Ask the operator to confirm the destructive reset.
fn confirm_reset(config: &Config) -> Result<bool, BootstrapError> {
    Confirm::new()
        .with_prompt(format!(
            "This will DROP and recreate all tables and enum types in '{}'. Continue?",
            config.database.database
        ))
        .default(false)
        .interact()
        .map_err(|e| BootstrapError::Io(std::io::Error::other(e.to_string())))
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
