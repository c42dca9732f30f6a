//! Candidate records: one action definition plus the README beside it.

use gha_blocks::{ContentBlock, Heading, MarkerPair, Splice, splice};
use gha_fs::{NormalizedPath, io};

use crate::action::{ActionDefinition, INPUT_COLUMNS};
use crate::{Error, Result};

/// README file looked up next to each action definition.
pub const README_FILE_NAME: &str = "README.md";

/// An action definition considered for README patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub action_path: NormalizedPath,
    pub readme_path: NormalizedPath,
    /// README text, `None` when no README exists beside the action.
    pub readme: Option<String>,
    pub definition: ActionDefinition,
}

/// What splicing a record's README would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordUpdate {
    /// The record failed the validity check.
    Skipped,
    /// The README already holds the current table.
    Unchanged,
    /// The README needs rewriting with this text.
    Changed(String),
}

impl CandidateRecord {
    /// Read the action definition at `action_path` and its sibling README.
    pub fn load(action_path: NormalizedPath) -> Result<Self> {
        let definition = ActionDefinition::load(&action_path)?;
        let readme_path = action_path.sibling(README_FILE_NAME);
        let readme = io::read_text_if_exists(&readme_path)?;

        Ok(Self {
            action_path,
            readme_path,
            readme,
            definition,
        })
    }

    /// A record is patched only when it declares inputs and its README exists
    /// and carries both markers on their own lines.
    pub fn is_valid(&self, markers: &MarkerPair) -> bool {
        if !self.definition.has_inputs() {
            return false;
        }
        match self.readme.as_deref() {
            Some(readme) => {
                let lines: Vec<&str> = readme.split('\n').collect();
                markers.is_contained_in(&lines)
            }
            None => false,
        }
    }

    /// The content block for this record's inputs.
    pub fn content_block(&self, heading: &Heading) -> ContentBlock {
        let rows: Vec<Vec<String>> = self
            .definition
            .rows()
            .iter()
            .map(|row| row.cells())
            .collect();
        ContentBlock::build(heading, &INPUT_COLUMNS, &rows)
    }
}

/// Validate and splice one record without touching the filesystem.
///
/// # Errors
/// - `Error::StaleRead` if a record that passed validation has no markers
/// - `Error::Blocks` for other splice failures such as inverted markers
pub fn update_record(
    record: &CandidateRecord,
    markers: &MarkerPair,
    heading: &Heading,
) -> Result<RecordUpdate> {
    if !record.is_valid(markers) {
        tracing::debug!(action = %record.action_path, "Skipping action without inputs or markers");
        return Ok(RecordUpdate::Skipped);
    }

    let readme = record.readme.as_deref().ok_or_else(|| Error::StaleRead {
        path: record.readme_path.to_native(),
    })?;

    match splice(readme, markers, &record.content_block(heading)) {
        Ok(Splice::Unchanged) => Ok(RecordUpdate::Unchanged),
        Ok(Splice::Changed(updated)) => Ok(RecordUpdate::Changed(updated)),
        Err(gha_blocks::Error::MarkersNotFound { .. }) => Err(Error::StaleRead {
            path: record.readme_path.to_native(),
        }),
        Err(e) => Err(e.into()),
    }
}
