//! daybar CLI - Incremental daily OHLCV report job.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod display;
mod logging;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "daybar")]
#[command(about = "Incremental daily OHLCV report over raw tick data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "daybar.toml")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (log errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every date missing from the ledger and write a new report
    Run {
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which dates the next run would fetch, without running it
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the processed-date ledger
    Ledger {
        /// Print the ledger as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = AppConfig::load(&cli.config)?;
    logging::init_logging(
        &logging::effective_level(&config.logging.level, cli.verbose, cli.quiet),
        config.logging.format,
    )?;
    tracing::debug!(path = %cli.config.display(), "Loaded configuration");

    match command {
        Commands::Run { json } => commands::run::run(&config, json).await,
        Commands::Plan { json } => commands::plan::plan(&config, json).await,
        Commands::Ledger { json } => commands::ledger::ledger(&config, json).await,
    }
}
