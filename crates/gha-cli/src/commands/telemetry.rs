//! Telemetry command implementation

use colored::Colorize;
use gha_core::telemetry::{self, DO_NOT_TRACK, ExportTarget, GITHUB_ENV};

use crate::cli::TelemetryArgs;
use crate::error::Result;

/// Run the telemetry command
pub fn run_telemetry(args: &TelemetryArgs) -> Result<()> {
    if args.verify {
        let verified = telemetry::verify(|name| std::env::var(name).ok())?;
        for name in verified {
            println!("{} verified {}", "OK".green().bold(), name);
        }
        return Ok(());
    }

    let do_not_track = std::env::var(DO_NOT_TRACK).ok();
    let vars = telemetry::telemetry_exports(do_not_track.as_deref(), args.additional.as_deref())?;
    if vars.is_empty() {
        tracing::info!("DO_NOT_TRACK is not set, nothing to export");
        return Ok(());
    }

    let target = ExportTarget::from_env(std::env::var(GITHUB_ENV).ok().as_deref());
    match target.export(&vars)? {
        Some(lines) => print!("{lines}"),
        None => {
            for var in &vars {
                println!("{} exported {}", "OK".green().bold(), var.name.cyan());
            }
        }
    }
    Ok(())
}
