//! [`TestRepo`] builder for README generation scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::git::{real_git_repo_with_commit, run_git};

/// An action definition with one input, matching the marker examples.
pub const SAMPLE_ACTION_YAML: &str = "\
inputs:
  action:
    description: description
    default: default
    required: false
";

/// A temporary directory laid out like an actions monorepo.
///
/// # Example
///
/// ```rust,no_run
/// use gha_test_utils::repo::{SAMPLE_ACTION_YAML, TestRepo};
///
/// let repo = TestRepo::new();
/// repo.write_file("my-action/action.yml", SAMPLE_ACTION_YAML);
/// repo.write_file("my-action/README.md", "# My action\n");
/// repo.init_git_with_commit();
/// repo.assert_file_contains("my-action/README.md", "# My action");
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the repository.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", path.display()));
    }

    /// Read `rel` as text.
    pub fn read_file(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("read_file: failed to read {}: {e}", path.display()))
    }

    /// Initialise git and commit everything written so far.
    pub fn init_git_with_commit(&self) {
        real_git_repo_with_commit(self.root());
    }

    /// Stage and commit everything currently in the working tree.
    pub fn commit_all(&self, message: &str) {
        run_git(self.root(), &["add", "."]);
        run_git(self.root(), &["commit", "-m", message]);
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        run_git(self.root(), &["rev-list", "--count", "HEAD"])
            .trim()
            .parse()
            .unwrap()
    }

    /// Subject line of the HEAD commit.
    pub fn head_subject(&self) -> String {
        run_git(self.root(), &["log", "-1", "--format=%s"])
            .trim()
            .to_string()
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read_file(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            file_content
        );
    }

    /// Assert that the file at `rel` does **not** contain `content`.
    pub fn assert_file_not_contains(&self, rel: &str, content: &str) {
        let file_content = self.read_file(rel);
        assert!(
            !file_content.contains(content),
            "File {} unexpectedly contains {}.\nActual: {}",
            rel,
            content,
            file_content
        );
    }
}
