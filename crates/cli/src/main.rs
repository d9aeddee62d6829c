//! `saq-gateway` CLI entry-point.
//!
//! Available sub-commands:
//! - `functions`   — list the callable functions and their parameters.
//! - `invoke`      — run one function with JSON arguments.
//! - `init-schema` — create the `saq` tables in the configured database.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::{SqliteConfig, SqliteProvider};
use functions::{register_saq_functions, FunctionRegistry, SAQ_CONNECTION_ALIAS};

#[derive(Parser)]
#[command(
    name = "saq-gateway",
    about = "Parameterized SQL gateway for the SAQ cocktail database",
    version
)]
struct Cli {
    /// SQLite database file holding the `saq` tables.
    #[arg(long, env = "SAQ_DATABASE_PATH", default_value = "saq.db", global = true)]
    database: PathBuf,

    /// Connection pool ceiling.
    #[arg(long, env = "SAQ_MAX_CONNECTIONS", default_value_t = 5, global = true)]
    max_connections: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered functions as JSON.
    Functions,
    /// Invoke a function and print its JSON result.
    Invoke {
        /// Function name, e.g. `read_cocktails`.
        name: String,
        /// Arguments as a JSON object keyed by parameter name.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Create the `saq` tables if they do not exist.
    InitSchema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let provider = Arc::new(SqliteProvider::new(SqliteConfig {
        database_path: cli.database.clone(),
        max_connections: cli.max_connections,
    })?);

    let mut registry = FunctionRegistry::new();
    register_saq_functions(&mut registry);
    registry.bind_connection(SAQ_CONNECTION_ALIAS, provider.clone());

    match cli.command {
        Command::Functions => {
            println!("{}", serde_json::to_string_pretty(&registry.list())?);
        }
        Command::Invoke { name, args } => {
            let args: Value = serde_json::from_str(&args)
                .with_context(|| format!("--args is not valid JSON: {args}"))?;
            let output = registry
                .invoke(&name, args)
                .await
                .with_context(|| format!("invoking '{name}' failed"))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::InitSchema => {
            info!("Initialising schema in {}", cli.database.display());
            let tables = db::schema::init_schema(provider.as_ref()).await?;
            info!("Schema ready ({tables} tables)");
        }
    }

    provider.close().await;
    Ok(())
}
