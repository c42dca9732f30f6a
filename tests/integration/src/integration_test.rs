//! End-to-end integration test for README generation
//!
//! Exercises the complete flow: discovery -> batch update -> commit -> push,
//! then a second run that must find nothing to do.

use gha_core::{
    DEFAULT_HEADING, DEFAULT_TAG_NAME, PublishOutcome, ReadmeUpdater, RunConfig, publish,
};
use gha_fs::NormalizedPath;
use gha_git::CommitIdentity;
use gha_test_utils::git::run_git;
use gha_test_utils::repo::TestRepo;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const DEPLOY_ACTION: &str = "\
name: Deploy
description: Deploy previews
inputs:
  token:
    description: GitHub token with deployment scope
    required: true
  environment:
    description: Target environment | preview or production
    default: preview
  retries:
    description: How many times to retry
    default: 3
";

const DEPLOY_README: &str = "\
# Deploy

Deploys things.

## Usage

<!-- ACTION-INPUT-LIST:START -->
stale table
<!-- ACTION-INPUT-LIST:END -->

## License

MIT
";

const EXPECTED_DEPLOY_README: &str = "\
# Deploy

Deploys things.

## Usage

<!-- ACTION-INPUT-LIST:START -->

### Inputs
| Name        | Default | Description                                 | Required |
| ----------- | ------- | ------------------------------------------- | -------- |
| token       |         | GitHub token with deployment scope          | true     |
| environment | preview | Target environment \\| preview or production | false    |
| retries     | 3       | How many times to retry                     | false    |

<!-- ACTION-INPUT-LIST:END -->

## License

MIT
";

fn monorepo_with_remote() -> (TestRepo, TempDir) {
    let repo = TestRepo::new();
    repo.write_file("deploy/action.yml", DEPLOY_ACTION);
    repo.write_file("deploy/README.md", DEPLOY_README);
    repo.write_file("lint/action.yaml", "name: Lint\nruns:\n  using: node20\n");
    repo.write_file("lint/README.md", "# Lint\n<!-- ACTION-INPUT-LIST:START -->\n<!-- ACTION-INPUT-LIST:END -->\n");
    repo.write_file("docs/README.md", "# Docs without an action\n");
    repo.init_git_with_commit();

    let remote = TempDir::new().unwrap();
    run_git(remote.path(), &["init", "--bare"]);
    let remote_url = remote.path().to_string_lossy().into_owned();
    run_git(repo.root(), &["remote", "add", "origin", remote_url.as_str()]);

    (repo, remote)
}

#[tokio::test]
async fn test_full_flow_updates_commits_and_pushes() {
    let (repo, remote) = monorepo_with_remote();
    let config = RunConfig::new(DEFAULT_TAG_NAME, DEFAULT_HEADING, "3")
        .unwrap()
        .with_committer(CommitIdentity::new("docs-bot", "docs-bot@example.com"))
        .with_commit_message("docs: update action inputs");

    let report = ReadmeUpdater::new(&config)
        .run(&NormalizedPath::new(repo.root()))
        .await
        .unwrap();

    assert_eq!(report.written, vec![report.root.join("deploy/README.md")]);
    assert_eq!(report.skipped, vec![report.root.join("lint/action.yaml")]);
    assert_eq!(repo.read_file("deploy/README.md"), EXPECTED_DEPLOY_README);

    let outcome = publish(&report.root, &config, &report).unwrap();
    assert!(matches!(outcome, PublishOutcome::Committed { .. }));
    assert_eq!(repo.commit_count(), 2);

    let branch = run_git(repo.root(), &["rev-parse", "--abbrev-ref", "HEAD"]);
    let pushed = run_git(remote.path(), &["rev-parse", branch.trim()]);
    let local = run_git(repo.root(), &["rev-parse", "HEAD"]);
    assert_eq!(pushed.trim(), local.trim());

    let changed = run_git(repo.root(), &["show", "--name-only", "--format=", "HEAD"]);
    assert_eq!(changed.trim(), "deploy/README.md");

    // Second run: nothing changes, nothing is committed
    let second = ReadmeUpdater::new(&config)
        .run(&NormalizedPath::new(repo.root()))
        .await
        .unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged, vec![second.root.join("deploy/README.md")]);

    let outcome = publish(&second.root, &config, &second).unwrap();
    assert_eq!(outcome, PublishOutcome::NothingToCommit);
    assert_eq!(repo.commit_count(), 2);
}

#[tokio::test]
async fn test_custom_tag_leaves_default_markers_alone() {
    let (repo, _remote) = monorepo_with_remote();
    let config = RunConfig::new("deploy docs", "Configuration", "2")
        .unwrap()
        .with_skip_commit(true);

    let report = ReadmeUpdater::new(&config)
        .run(&NormalizedPath::new(repo.root()))
        .await
        .unwrap();

    assert!(report.is_noop());
    assert_eq!(repo.read_file("deploy/README.md"), DEPLOY_README);
    assert_eq!(
        publish(&report.root, &config, &report).unwrap(),
        PublishOutcome::NothingToCommit
    );
}
