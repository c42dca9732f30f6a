//! GitHub Actions toolkit CLI
//!
//! Backends for repository maintenance actions: README input tables and the
//! telemetry opt-out exports.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Readme(args)) => commands::run_readme(args).await,
        Some(Commands::Telemetry(args)) => commands::run_telemetry(&args),
        None => {
            println!("{} GitHub Actions toolkit", "gha".green().bold());
            println!();
            println!("Run {} for available commands.", "gha --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays parseable (`--json`, env exports).
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Verbose mode enabled");
}
