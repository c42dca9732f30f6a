//! End-to-end tests that run the compiled `gha` binary using assert_cmd.

use assert_cmd::Command;
use gha_test_utils::git::run_git;
use gha_test_utils::repo::{SAMPLE_ACTION_YAML, TestRepo};
use predicates::prelude::*;
use tempfile::tempdir;

const EMPTY_REGION: &str = "# Action\n<!-- ACTION-INPUT-LIST:START -->\n<!-- ACTION-INPUT-LIST:END -->\n";

/// A `gha` command with every runner-provided variable cleared.
fn gha_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gha"));
    for var in [
        "INPUT_COMMENT_TAG_NAME",
        "INPUT_HEADING",
        "INPUT_HEADING_LEVEL",
        "INPUT_COMMIT_MESSAGE",
        "INPUT_COMMITTER_USERNAME",
        "INPUT_COMMITTER_EMAIL",
        "INPUT_GH_TOKEN",
        "INPUT_GIT_PROVIDER",
        "INPUT_SKIP_COMMIT",
        "INPUT_DEBUG",
        "INPUT_ADDITIONAL",
        "DO_NOT_TRACK",
        "GITHUB_ENV",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn action_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.write_file("action.yml", SAMPLE_ACTION_YAML);
    repo.write_file("README.md", EMPTY_REGION);
    repo.init_git_with_commit();
    repo
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_output() {
    gha_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("readme"))
        .stdout(predicate::str::contains("telemetry"));
}

#[test]
fn test_no_command_shows_help_hint() {
    gha_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("gha --help"));
}

// ============================================================================
// Readme
// ============================================================================

#[test]
fn test_readme_skip_commit_updates_working_tree() {
    let repo = action_repo();

    gha_cmd()
        .current_dir(repo.root())
        .args(["readme", "--skip-commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains("uncommitted"));

    repo.assert_file_contains("README.md", "| action | default | description | false    |");
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_readme_inputs_from_environment() {
    let repo = TestRepo::new();
    repo.write_file("action.yml", SAMPLE_ACTION_YAML);
    repo.write_file("README.md", "<!-- DOCS:START -->\n<!-- DOCS:END -->\n");
    repo.init_git_with_commit();

    gha_cmd()
        .current_dir(repo.root())
        .arg("readme")
        .env("INPUT_COMMENT_TAG_NAME", "docs")
        .env("INPUT_HEADING", "Options")
        .env("INPUT_HEADING_LEVEL", "2")
        .env("INPUT_SKIP_COMMIT", "true")
        .assert()
        .success();

    repo.assert_file_contains("README.md", "## Options");
}

#[test]
fn test_readme_json_report() {
    let repo = action_repo();

    let output = gha_cmd()
        .args(["readme", "--json", "--skip-commit", "--root"])
        .arg(repo.root())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["written"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["failures"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_readme_debug_prints_diff_without_commit() {
    let repo = action_repo();

    gha_cmd()
        .current_dir(repo.root())
        .args(["readme", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+### Inputs"));

    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_readme_dry_run_leaves_files_alone() {
    let repo = action_repo();

    gha_cmd()
        .current_dir(repo.root())
        .args(["readme", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DIFF"));

    assert_eq!(repo.read_file("README.md"), EMPTY_REGION);
}

#[test]
fn test_readme_commits_and_pushes() {
    let repo = action_repo();
    let remote = tempdir().unwrap();
    run_git(remote.path(), &["init", "--bare"]);
    let remote_url = remote.path().to_string_lossy().into_owned();
    run_git(repo.root(), &["remote", "add", "origin", remote_url.as_str()]);

    gha_cmd()
        .current_dir(repo.root())
        .args(["readme", "--commit-message", "docs: sync inputs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Committed and pushed"));

    assert_eq!(repo.head_subject(), "docs: sync inputs");
    let branch = run_git(repo.root(), &["rev-parse", "--abbrev-ref", "HEAD"]);
    let pushed = run_git(remote.path(), &["rev-parse", branch.trim()]);
    let local = run_git(repo.root(), &["rev-parse", "HEAD"]);
    assert_eq!(pushed.trim(), local.trim());
}

#[test]
fn test_readme_nothing_to_commit() {
    let repo = TestRepo::new();
    repo.write_file("action.yml", "name: no inputs\n");
    repo.init_git_with_commit();

    gha_cmd()
        .current_dir(repo.root())
        .arg("readme")
        .assert()
        .success()
        .stderr(predicate::str::contains("no readmes to commit"));
}

#[test]
fn test_readme_rejects_unknown_provider() {
    let repo = action_repo();

    gha_cmd()
        .current_dir(repo.root())
        .args(["readme", "--git-provider", "gitlab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gitlab"));

    assert_eq!(repo.read_file("README.md"), EMPTY_REGION);
}

#[test]
fn test_readme_rejects_invalid_boolean_input() {
    let repo = action_repo();

    gha_cmd()
        .current_dir(repo.root())
        .arg("readme")
        .env("INPUT_SKIP_COMMIT", "yes")
        .assert()
        .failure();
}

#[test]
fn test_readme_failure_exits_nonzero_after_other_writes() {
    let repo = TestRepo::new();
    repo.write_file("broken/action.yml", "inputs: [unterminated\n");
    repo.write_file("good/action.yml", SAMPLE_ACTION_YAML);
    repo.write_file("good/README.md", EMPTY_REGION);
    repo.init_git_with_commit();

    gha_cmd()
        .current_dir(repo.root())
        .args(["readme", "--skip-commit"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("could not be processed"));

    repo.assert_file_contains("good/README.md", "### Inputs");
}

#[test]
fn test_readme_outside_repository_fails() {
    let dir = tempdir().unwrap();

    gha_cmd()
        .current_dir(dir.path())
        .arg("readme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Telemetry
// ============================================================================

#[test]
fn test_telemetry_without_do_not_track_exports_nothing() {
    gha_cmd()
        .arg("telemetry")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_telemetry_prints_exports_without_github_env() {
    gha_cmd()
        .arg("telemetry")
        .env("DO_NOT_TRACK", "1")
        .env("INPUT_ADDITIONAL", r#"{"GATSBY_TELEMETRY_DISABLED": 1}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("GATSBY_TELEMETRY_DISABLED=1\n"))
        .stdout(predicate::str::contains("WRANGLER_SEND_METRICS=false"));
}

#[test]
fn test_telemetry_appends_to_github_env() {
    let dir = tempdir().unwrap();
    let env_file = dir.path().join("env");

    gha_cmd()
        .arg("telemetry")
        .env("DO_NOT_TRACK", "true")
        .env("GITHUB_ENV", &env_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported"));

    let content = std::fs::read_to_string(&env_file).unwrap();
    assert!(content.contains("ASTRO_TELEMETRY_DISABLED<<ghadelimiter_"));
    assert!(content.contains("\nfalse\n"));
}

#[test]
fn test_telemetry_verify_fails_when_missing() {
    gha_cmd()
        .args(["telemetry", "--verify"])
        .env("DO_NOT_TRACK", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEXT_TELEMETRY_DISABLED"));
}

#[test]
fn test_telemetry_verify_passes_when_set() {
    gha_cmd()
        .args(["telemetry", "--verify"])
        .env("DO_NOT_TRACK", "1")
        .env("ASTRO_TELEMETRY_DISABLED", "1")
        .env("NEXT_TELEMETRY_DISABLED", "1")
        .env("TURBO_TELEMETRY_DISABLED", "1")
        .env("VERCEL_TELEMETRY_DISABLED", "1")
        .env("WRANGLER_SEND_METRICS", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains("verified WRANGLER_SEND_METRICS"));
}
