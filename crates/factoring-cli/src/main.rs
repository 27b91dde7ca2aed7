//! Factoring CLI - Command-line host for the factoring record store

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "factoring")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the store directory
    #[arg(short, long, default_value = "./data")]
    db_path: PathBuf,

    /// JSON configuration file (overrides --db-path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store (writes the keep-alive sentinel)
    Init {
        /// Host function name; only "init" is accepted
        #[arg(long, default_value = "init")]
        function: String,
    },

    /// Invoke a store operation
    Invoke {
        /// Operation name (SaveData, KeepaliveQuery, QueryDataByFabricTxId, QueryDataByBusinessNo)
        function: String,

        /// Operation arguments
        args: Vec<String>,

        /// Run under this transaction id instead of allocating one
        #[arg(long)]
        tx_id: Option<String>,
    },

    /// Store information and status
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let db = commands::open_db(&cli.db_path, cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Init { function } => {
            commands::init::execute(&db, &function)?;
        }
        Commands::Invoke {
            function,
            args,
            tx_id,
        } => {
            commands::invoke::execute(&db, &function, &args, tx_id.as_deref())?;
        }
        Commands::Status => {
            commands::status::execute(&db)?;
        }
    }

    db.close()?;
    Ok(())
}
