//! Commit and push regenerated READMEs, or report what would be committed.

use serde::Serialize;

use gha_fs::NormalizedPath;
use gha_git::StatusEntry;

use crate::config::RunConfig;
use crate::updater::BatchReport;
use crate::Result;

/// Diff of one written README, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathDiff {
    pub path: String,
    pub diff: String,
}

/// What publishing did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// No README was written.
    NothingToCommit,
    /// Debug mode: status and diffs were collected instead of committing.
    DebugOnly {
        status: Vec<StatusEntry>,
        diffs: Vec<PathDiff>,
    },
    /// `skip_commit` or a dry run left the working tree alone.
    Skipped,
    /// Committed and pushed.
    Committed { commit: String },
}

/// Publish the READMEs written by a batch run.
///
/// Written paths are committed on HEAD with the configured identity and the
/// current branch is pushed to the configured remote. Debug mode and
/// `skip_commit` stop before committing.
///
/// # Errors
/// Git failures while staging, committing or pushing.
pub fn publish(root: &NormalizedPath, config: &RunConfig, report: &BatchReport) -> Result<PublishOutcome> {
    if config.dry_run {
        tracing::info!("dry run, not committing");
        return Ok(PublishOutcome::Skipped);
    }

    if report.written.is_empty() {
        tracing::error!("no readmes to commit");
        return Ok(PublishOutcome::NothingToCommit);
    }

    let repo = gha_git::open(root)?;
    let paths = report
        .written
        .iter()
        .map(|path| gha_git::relative_path(root, path))
        .collect::<gha_git::Result<Vec<_>>>()?;

    if config.debug {
        let status = gha_git::status(&repo)?;
        for entry in &status {
            tracing::info!(status = %entry, "Repository status");
        }

        let mut diffs = Vec::with_capacity(paths.len());
        for path in paths {
            let diff = gha_git::diff_path(&repo, &path)?;
            tracing::info!(path = %path, "Diff:\n{diff}");
            diffs.push(PathDiff { path, diff });
        }
        return Ok(PublishOutcome::DebugOnly { status, diffs });
    }

    if config.skip_commit {
        tracing::info!(files = paths.len(), "skip_commit set, leaving changes uncommitted");
        return Ok(PublishOutcome::Skipped);
    }

    let oid = gha_git::commit_paths(&repo, &paths, &config.commit_message, &config.committer)?;
    gha_git::push_current_branch(&repo, &config.remote, config.token.as_deref())?;
    tracing::info!(provider = %config.provider, remote = %config.remote, "Published readme changes");

    Ok(PublishOutcome::Committed {
        commit: oid.to_string(),
    })
}
