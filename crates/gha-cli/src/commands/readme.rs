//! Readme command implementation

use colored::Colorize;
use gha_core::{
    BatchReport, CommitIdentity, GitProvider, PublishOutcome, ReadmeUpdater, RunConfig, publish,
};
use gha_fs::NormalizedPath;

use crate::cli::ReadmeArgs;
use crate::error::{CliError, Result};

/// Turn parsed arguments into a validated run configuration.
pub fn build_config(args: &ReadmeArgs) -> Result<RunConfig> {
    let provider: GitProvider = args.git_provider.parse()?;
    let committer = CommitIdentity::new(&args.committer_username, &args.committer_email);

    Ok(
        RunConfig::new(&args.comment_tag_name, &args.heading, &args.heading_level)?
            .with_commit_message(args.commit_message.as_str())
            .with_committer(committer)
            .with_token(args.gh_token.clone())
            .with_provider(provider)
            .with_skip_commit(args.skip_commit)
            .with_debug(args.debug)
            .with_dry_run(args.dry_run),
    )
}

/// Run the readme command
pub async fn run_readme(args: ReadmeArgs) -> Result<()> {
    let config = build_config(&args)?;
    let start = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    if !args.json {
        println!(
            "{} Updating action readmes ({})",
            "=>".blue().bold(),
            config.markers.start().dimmed()
        );
    }

    let report = ReadmeUpdater::new(&config)
        .run(&NormalizedPath::new(start))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let failures = report.failures.len();
    let root = report.root.clone();
    let json = args.json;
    let outcome = tokio::task::spawn_blocking(move || publish(&root, &config, &report))
        .await
        .map_err(gha_core::Error::from)??;

    if !json {
        print_outcome(&outcome);
    }

    if failures > 0 {
        return Err(CliError::user(format!(
            "{failures} action(s) could not be processed"
        )));
    }
    Ok(())
}

fn relative<'a>(report: &BatchReport, path: &'a NormalizedPath) -> &'a str {
    path.strip_prefix(&report.root).unwrap_or(path.as_str())
}

fn print_report(report: &BatchReport) {
    for path in &report.written {
        println!("  {} {}", "OK".green().bold(), relative(report, path));
    }
    for path in &report.unchanged {
        println!("  {} {} (unchanged)", "OK".green(), relative(report, path).dimmed());
    }
    for path in &report.skipped {
        println!("  {} {}", "SKIP".yellow(), relative(report, path).dimmed());
    }
    for preview in &report.previews {
        println!("  {} {}", "DIFF".cyan().bold(), relative(report, &preview.readme_path));
        print!("{}", preview.diff);
    }
    for failure in &report.failures {
        println!(
            "  {} {}: {}",
            "ERROR".red().bold(),
            relative(report, &failure.action_path),
            failure.message
        );
    }
    if report.is_noop() {
        println!("{} No readmes with inputs and markers found", "=>".blue().bold());
    }
}

fn print_outcome(outcome: &PublishOutcome) {
    match outcome {
        PublishOutcome::NothingToCommit => {}
        PublishOutcome::DebugOnly { status, diffs } => {
            println!("{} Repository status", "=>".blue().bold());
            for entry in status {
                println!("  {entry}");
            }
            for diff in diffs {
                println!("{} {}", "=>".blue().bold(), diff.path);
                print!("{}", diff.diff);
            }
        }
        PublishOutcome::Skipped => {
            println!("{} Changes left uncommitted", "=>".blue().bold());
        }
        PublishOutcome::Committed { commit } => {
            println!(
                "{} Committed and pushed {}",
                "OK".green().bold(),
                commit.get(..7).unwrap_or(commit).cyan()
            );
        }
    }
}
