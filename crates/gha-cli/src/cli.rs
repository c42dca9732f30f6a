//! CLI argument parsing using clap derive
//!
//! Every `readme` and `telemetry` option can also be supplied through the
//! `INPUT_<NAME>` variable the Actions runner sets for action inputs.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use gha_core::{
    DEFAULT_COMMIT_MESSAGE, DEFAULT_COMMITTER_EMAIL, DEFAULT_COMMITTER_NAME, DEFAULT_HEADING,
    DEFAULT_TAG_NAME,
};

/// GitHub Actions toolkit - keep action READMEs and job environments in shape
#[derive(Parser, Debug)]
#[command(name = "gha")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Regenerate the inputs table in the README beside every action.yml
    ///
    /// Only READMEs carrying both markers on their own lines are touched:
    ///
    ///   <!-- ACTION-INPUT-LIST:START -->
    ///   <!-- ACTION-INPUT-LIST:END -->
    Readme(ReadmeArgs),

    /// Export telemetry opt-out variables when DO_NOT_TRACK is set
    Telemetry(TelemetryArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReadmeArgs {
    /// Tag used in the start and end markers
    #[arg(long, env = "INPUT_COMMENT_TAG_NAME", default_value = DEFAULT_TAG_NAME)]
    pub comment_tag_name: String,

    /// Heading text placed above the table
    #[arg(long, env = "INPUT_HEADING", default_value = DEFAULT_HEADING)]
    pub heading: String,

    /// Heading level, clamped to 1-6
    #[arg(long, env = "INPUT_HEADING_LEVEL", default_value = "3")]
    pub heading_level: String,

    #[arg(long, env = "INPUT_COMMIT_MESSAGE", default_value = DEFAULT_COMMIT_MESSAGE)]
    pub commit_message: String,

    #[arg(long, env = "INPUT_COMMITTER_USERNAME", default_value = DEFAULT_COMMITTER_NAME)]
    pub committer_username: String,

    #[arg(long, env = "INPUT_COMMITTER_EMAIL", default_value = DEFAULT_COMMITTER_EMAIL)]
    pub committer_email: String,

    /// Token used to authenticate the push
    #[arg(long, env = "INPUT_GH_TOKEN", hide_env_values = true)]
    pub gh_token: Option<String>,

    /// Hosting provider; only "github" is supported
    #[arg(long, env = "INPUT_GIT_PROVIDER", default_value = "github")]
    pub git_provider: String,

    /// Leave regenerated READMEs uncommitted
    #[arg(
        long,
        env = "INPUT_SKIP_COMMIT",
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set,
        value_parser = boolean_input
    )]
    pub skip_commit: bool,

    /// Print repository status and diffs instead of committing
    #[arg(
        long,
        env = "INPUT_DEBUG",
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set,
        value_parser = boolean_input
    )]
    pub debug: bool,

    /// Show the changes without writing or committing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Any path inside the repository (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TelemetryArgs {
    /// Extra variables to export, as a JSON object or NAME=value lines
    #[arg(long, env = "INPUT_ADDITIONAL")]
    pub additional: Option<String>,

    /// Check that the opt-out variables are set instead of exporting them
    #[arg(long)]
    pub verify: bool,
}

/// Boolean input grammar of the Actions runner. An empty value is false.
fn boolean_input(value: &str) -> std::result::Result<bool, String> {
    if value.trim().is_empty() {
        return Ok(false);
    }
    gha_core::parse_boolean_input("flag", value).map_err(|e| match e {
        gha_core::Error::InvalidInput { message, .. } => message,
        other => other.to_string(),
    })
}
