//! Batch driver: regenerate the input table of every tracked action's README.
//!
//! Each action is handled by its own blocking task. Tasks share nothing but
//! cloned configuration, and every README is touched by exactly one task, so
//! the fan-out needs no locking. One record failing is recorded in the report
//! and never stops the others.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use similar::TextDiff;
use tokio::task::{self, JoinSet};

use gha_blocks::{Heading, MarkerPair};
use gha_fs::{NormalizedPath, io};

use crate::action::is_action_file;
use crate::config::RunConfig;
use crate::readme::{CandidateRecord, README_FILE_NAME, RecordUpdate, update_record};
use crate::Result;

/// Terminal state of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOutcome {
    Skipped,
    Unchanged,
    Written,
}

/// A record that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub action_path: NormalizedPath,
    pub message: String,
}

/// Unified diff of a README that a dry run would have rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub readme_path: NormalizedPath,
    pub diff: String,
}

/// Result of one batch run, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub root: NormalizedPath,
    /// READMEs rewritten on disk.
    pub written: Vec<NormalizedPath>,
    pub unchanged: Vec<NormalizedPath>,
    /// Action definitions that failed the validity check.
    pub skipped: Vec<NormalizedPath>,
    pub failures: Vec<RecordFailure>,
    /// Only filled on dry runs.
    pub previews: Vec<Preview>,
}

impl BatchReport {
    fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// True when no record survived the validity filter.
    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
            && self.unchanged.is_empty()
            && self.previews.is_empty()
            && self.failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn sort(&mut self) {
        self.written.sort();
        self.unchanged.sort();
        self.skipped.sort();
        self.failures.sort_by(|a, b| a.action_path.cmp(&b.action_path));
        self.previews.sort_by(|a, b| a.readme_path.cmp(&b.readme_path));
    }
}

struct ProcessedRecord {
    action_path: NormalizedPath,
    readme_path: NormalizedPath,
    outcome: RecordOutcome,
    preview: Option<String>,
}

/// Regenerates README input tables across a repository.
#[derive(Debug, Clone)]
pub struct ReadmeUpdater {
    markers: MarkerPair,
    heading: Heading,
    dry_run: bool,
}

impl ReadmeUpdater {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            markers: config.markers.clone(),
            heading: config.heading.clone(),
            dry_run: config.dry_run,
        }
    }

    /// Update every tracked action definition in the repository containing
    /// `start`.
    ///
    /// # Errors
    /// Fails only when the repository cannot be found or its index cannot be
    /// read. Per-record errors land in [`BatchReport::failures`].
    pub async fn run(&self, start: &NormalizedPath) -> Result<BatchReport> {
        let start = start.clone();
        let (root, actions) = task::spawn_blocking(move || discover_actions(&start)).await??;

        tracing::info!(root = %root, actions = actions.len(), "Found action definitions");
        Ok(self.update_all(root, actions).await)
    }

    /// Update the given action definitions concurrently.
    ///
    /// When several definitions share a README, only the one named
    /// `action.yml` (or else the first by path) is processed and the rest
    /// are reported as skipped.
    pub async fn update_all(&self, root: NormalizedPath, actions: Vec<NormalizedPath>) -> BatchReport {
        let mut report = BatchReport::new(root);
        let (actions, shadowed) = claim_readmes(actions);
        report.skipped.extend(shadowed);

        let mut set = JoinSet::new();
        let mut pending = HashMap::new();

        for action_path in actions {
            let markers = self.markers.clone();
            let heading = self.heading.clone();
            let dry_run = self.dry_run;
            let task_path = action_path.clone();

            let handle = set.spawn_blocking(move || {
                process_record(task_path, &markers, &heading, dry_run)
            });
            pending.insert(handle.id(), action_path);
        }

        while let Some(joined) = set.join_next_with_id().await {
            match joined {
                Ok((id, Ok(processed))) => {
                    pending.remove(&id);
                    record_outcome(&mut report, processed);
                }
                Ok((id, Err(e))) => {
                    if let Some(action_path) = pending.remove(&id) {
                        tracing::error!(action = %action_path, error = %e, "Failed to update readme");
                        report.failures.push(RecordFailure {
                            action_path,
                            message: e.to_string(),
                        });
                    }
                }
                Err(e) => {
                    if let Some(action_path) = pending.remove(&e.id()) {
                        tracing::error!(action = %action_path, error = %e, "Readme task did not complete");
                        report.failures.push(RecordFailure {
                            action_path,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        report.sort();
        if report.is_noop() {
            tracing::info!("no inputs found, not updating any readmes");
        }
        report
    }
}

fn discover_actions(start: &NormalizedPath) -> Result<(NormalizedPath, Vec<NormalizedPath>)> {
    let root = gha_git::discover_root(start)?;
    let repo = gha_git::open(&root)?;

    let actions = gha_git::list_tracked_files(&repo)?
        .into_iter()
        .filter(|path| is_action_file(path))
        .map(|path| root.join(&path))
        .collect();

    Ok((root, actions))
}

/// Pick one definition per README path. Returns the kept and shadowed paths.
fn claim_readmes(actions: Vec<NormalizedPath>) -> (Vec<NormalizedPath>, Vec<NormalizedPath>) {
    let mut by_readme: BTreeMap<NormalizedPath, Vec<NormalizedPath>> = BTreeMap::new();
    for action_path in actions {
        by_readme
            .entry(action_path.sibling(README_FILE_NAME))
            .or_default()
            .push(action_path);
    }

    let mut kept = Vec::with_capacity(by_readme.len());
    let mut shadowed = Vec::new();
    for (readme_path, mut candidates) in by_readme {
        candidates.sort_by(|a, b| {
            let rank = |p: &NormalizedPath| p.file_name() != Some("action.yml");
            rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
        });
        candidates.dedup();
        let mut candidates = candidates.into_iter();
        if let Some(winner) = candidates.next() {
            for loser in candidates {
                tracing::warn!(
                    action = %loser,
                    readme = %readme_path,
                    kept = %winner,
                    "Another action definition already owns this readme, skipping"
                );
                shadowed.push(loser);
            }
            kept.push(winner);
        }
    }
    (kept, shadowed)
}

fn process_record(
    action_path: NormalizedPath,
    markers: &MarkerPair,
    heading: &Heading,
    dry_run: bool,
) -> Result<ProcessedRecord> {
    let record = CandidateRecord::load(action_path)?;

    let (outcome, preview) = match update_record(&record, markers, heading)? {
        RecordUpdate::Skipped => (RecordOutcome::Skipped, None),
        RecordUpdate::Unchanged => {
            tracing::info!(
                "readme at path {} is unchanged, not writing changes",
                record.readme_path
            );
            (RecordOutcome::Unchanged, None)
        }
        RecordUpdate::Changed(updated) if dry_run => {
            let original = record.readme.as_deref().unwrap_or_default();
            let diff = TextDiff::from_lines(original, updated.as_str())
                .unified_diff()
                .header(record.readme_path.as_str(), record.readme_path.as_str())
                .to_string();
            (RecordOutcome::Written, Some(diff))
        }
        RecordUpdate::Changed(updated) => {
            io::write_text(&record.readme_path, &updated)?;
            tracing::info!(path = %record.readme_path, "Updated readme");
            (RecordOutcome::Written, None)
        }
    };

    Ok(ProcessedRecord {
        action_path: record.action_path,
        readme_path: record.readme_path,
        outcome,
        preview,
    })
}

fn record_outcome(report: &mut BatchReport, processed: ProcessedRecord) {
    match (processed.outcome, processed.preview) {
        (RecordOutcome::Skipped, _) => report.skipped.push(processed.action_path),
        (RecordOutcome::Unchanged, _) => report.unchanged.push(processed.readme_path),
        (RecordOutcome::Written, Some(diff)) => report.previews.push(Preview {
            readme_path: processed.readme_path,
            diff,
        }),
        (RecordOutcome::Written, None) => report.written.push(processed.readme_path),
    }
}
