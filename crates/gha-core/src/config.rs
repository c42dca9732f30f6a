//! Run configuration for the README updater.
//!
//! Every setting the updater and publisher read lives on [`RunConfig`] and is
//! threaded through calls explicitly; nothing is kept in process-wide state.

use std::fmt;
use std::str::FromStr;

use gha_blocks::{Heading, HeadingLevel, MarkerPair};
use gha_git::CommitIdentity;

use crate::{Error, Result};

pub const DEFAULT_TAG_NAME: &str = "ACTION-INPUT-LIST";
pub const DEFAULT_HEADING: &str = "Inputs";
pub const DEFAULT_COMMIT_MESSAGE: &str = "docs: update action inputs";
pub const DEFAULT_COMMITTER_NAME: &str = "github-actions[bot]";
pub const DEFAULT_COMMITTER_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";
pub const DEFAULT_REMOTE: &str = "origin";

/// Hosting provider the regenerated READMEs are pushed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GitProvider {
    #[default]
    Github,
}

impl FromStr for GitProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::Github),
            other => Err(Error::invalid_input(
                "git_provider",
                format!("unsupported provider '{other}' (expected 'github')"),
            )),
        }
    }
}

impl fmt::Display for GitProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
        }
    }
}

/// Parses a boolean action input.
///
/// Accepts the same spellings as the GitHub Actions toolkit:
/// `true`, `True`, `TRUE`, `false`, `False`, `FALSE`.
pub fn parse_boolean_input(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(Error::invalid_input(
            name,
            format!("'{other}' is not a boolean (expected true or false)"),
        )),
    }
}

/// Everything a README update run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub markers: MarkerPair,
    pub heading: Heading,
    pub commit_message: String,
    pub committer: CommitIdentity,
    pub token: Option<String>,
    pub provider: GitProvider,
    pub remote: String,
    /// Leave regenerated files uncommitted.
    pub skip_commit: bool,
    /// Report status and diffs instead of committing.
    pub debug: bool,
    /// Compute changes without writing any file.
    pub dry_run: bool,
}

impl RunConfig {
    /// Build a configuration with default commit settings.
    ///
    /// # Errors
    /// Returns `Error::Blocks` when `tag_name` is blank.
    pub fn new(tag_name: &str, heading: &str, heading_level: &str) -> Result<Self> {
        Ok(Self {
            markers: MarkerPair::from_tag(tag_name)?,
            heading: Heading::new(heading, HeadingLevel::parse(heading_level)),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            committer: CommitIdentity::new(DEFAULT_COMMITTER_NAME, DEFAULT_COMMITTER_EMAIL),
            token: None,
            provider: GitProvider::default(),
            remote: DEFAULT_REMOTE.to_string(),
            skip_commit: false,
            debug: false,
            dry_run: false,
        })
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    pub fn with_committer(mut self, identity: CommitIdentity) -> Self {
        self.committer = identity;
        self
    }

    /// Set the push token; blank tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_provider(mut self, provider: GitProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_skip_commit(mut self, skip_commit: bool) -> Self {
        self.skip_commit = skip_commit;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::new(DEFAULT_TAG_NAME, DEFAULT_HEADING, "3").unwrap();
        assert_eq!(config.markers.start(), "<!-- ACTION-INPUT-LIST:START -->");
        assert_eq!(config.heading.render(), "### Inputs");
        assert!(!config.debug);
    }

    #[test]
    fn test_blank_token_is_absent() {
        let config = RunConfig::new(DEFAULT_TAG_NAME, DEFAULT_HEADING, "3")
            .unwrap()
            .with_token(Some("  ".into()));
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_blank_tag_rejected() {
        assert!(matches!(
            RunConfig::new("", "Inputs", "3"),
            Err(Error::Blocks(gha_blocks::Error::InvalidTagName { .. }))
        ));
    }
}
