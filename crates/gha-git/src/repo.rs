//! Repository discovery and read-only queries.

use git2::{DiffFormat, DiffOptions, Repository, Status, StatusOptions};

use gha_fs::NormalizedPath;

use crate::{Error, Result};

/// A changed path reported by [`status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Short porcelain-style code, e.g. ` M` or `??`.
    pub code: String,
}

impl std::fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.path)
    }
}

/// Open the repository whose working tree is `root`.
pub fn open(root: &NormalizedPath) -> Result<Repository> {
    Repository::open(root.to_native()).map_err(|_| Error::NotARepository {
        path: root.to_native(),
    })
}

/// Find the working tree root of the repository containing `path`.
///
/// Walks up from `path` like `git rev-parse --show-toplevel`. Bare
/// repositories have no working tree and are rejected.
pub fn discover_root(path: &NormalizedPath) -> Result<NormalizedPath> {
    let repo = Repository::discover(path.to_native()).map_err(|_| Error::NotARepository {
        path: path.to_native(),
    })?;

    let workdir = repo.workdir().ok_or_else(|| Error::NotARepository {
        path: path.to_native(),
    })?;

    let workdir = workdir.to_string_lossy();
    let trimmed = workdir.trim_end_matches(['/', '\\']);
    let root = if trimmed.is_empty() { "/" } else { trimmed };

    tracing::debug!(root = %root, "Discovered repository root");
    Ok(NormalizedPath::new(root))
}

/// List every path in the index, relative to the repository root.
///
/// This is the set `git ls-files` reports; untracked files are not included.
pub fn list_tracked_files(repo: &Repository) -> Result<Vec<String>> {
    let index = repo.index()?;

    let mut paths: Vec<String> = index
        .iter()
        .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
        .collect();
    // Conflicted entries appear once per stage
    paths.dedup();

    Ok(paths)
}

/// Express `path` relative to the working tree `root`.
pub fn relative_path(root: &NormalizedPath, path: &NormalizedPath) -> Result<String> {
    match path.strip_prefix(root) {
        Some(rel) if !rel.is_empty() => Ok(rel.to_string()),
        _ => Err(Error::OutsideRepository {
            path: path.to_native(),
            root: root.to_native(),
        }),
    }
}

/// Working tree status, including untracked files.
pub fn status(repo: &Repository) -> Result<Vec<StatusEntry>> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true);

    let statuses = repo.statuses(Some(&mut opts))?;

    Ok(statuses
        .iter()
        .filter_map(|entry| {
            let path = entry.path()?.to_string();
            Some(StatusEntry {
                path,
                code: status_code(entry.status()),
            })
        })
        .collect())
}

/// Unified diff of one path between the index and the working tree.
///
/// Returns an empty string when the path has no unstaged changes.
pub fn diff_path(repo: &Repository, rel_path: &str) -> Result<String> {
    let mut opts = DiffOptions::new();
    opts.pathspec(rel_path).include_untracked(true).show_untracked_content(true);

    let diff = repo.diff_index_to_workdir(None, Some(&mut opts))?;

    let mut out = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if matches!(origin, '+' | '-' | ' ') {
            out.push(origin);
        }
        out.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;

    Ok(out)
}

fn status_code(status: Status) -> String {
    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else {
        ' '
    };

    let worktree = if status.is_wt_new() {
        '?'
    } else if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else {
        ' '
    };

    if status.is_wt_new() && index == ' ' {
        "??".to_string()
    } else {
        format!("{index}{worktree}")
    }
}
