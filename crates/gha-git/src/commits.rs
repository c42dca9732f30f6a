//! Staging, committing and pushing regenerated files.

use git2::{Cred, Oid, PushOptions, RemoteCallbacks, Repository, Signature};

use crate::{Error, Result};

/// Username paired with a token for HTTPS push authentication.
const TOKEN_USERNAME: &str = "x-access-token";

/// Name and email recorded as both author and committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// A signature stamped with the current time.
    pub fn signature(&self) -> Result<Signature<'static>> {
        Ok(Signature::now(&self.name, &self.email)?)
    }
}

/// Stage `paths` and commit them on HEAD.
///
/// Paths are relative to the repository root. An unborn HEAD produces a root
/// commit. Only the given paths are added; other working tree changes stay
/// unstaged.
pub fn commit_paths(
    repo: &Repository,
    paths: &[String],
    message: &str,
    identity: &CommitIdentity,
) -> Result<Oid> {
    let mut index = repo.index()?;
    for path in paths {
        index.add_path(std::path::Path::new(path))?;
    }
    index.write()?;

    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let signature = identity.signature()?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

    tracing::info!(commit = %oid, files = paths.len(), "Committed regenerated files");
    Ok(oid)
}

/// Push the current branch to `remote_name`.
///
/// When `token` is given it is offered as HTTPS credentials; otherwise the
/// remote's default credential handling applies.
///
/// # Errors
/// - `Error::DetachedHead` when HEAD does not point at a branch
/// - `Error::RemoteNotFound` when the remote does not exist
/// - `Error::PushFailed` when the transport rejects the push
pub fn push_current_branch(repo: &Repository, remote_name: &str, token: Option<&str>) -> Result<()> {
    let head = repo.head()?;
    if !head.is_branch() {
        return Err(Error::DetachedHead);
    }
    let branch = head.shorthand().ok_or(Error::DetachedHead)?.to_string();

    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|_| Error::RemoteNotFound {
            name: remote_name.to_string(),
        })?;

    let mut callbacks = RemoteCallbacks::new();
    if let Some(token) = token {
        let token = token.to_string();
        callbacks.credentials(move |_url, _username, _allowed| {
            Cred::userpass_plaintext(TOKEN_USERNAME, &token)
        });
    }

    let mut opts = PushOptions::new();
    opts.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    remote
        .push(&[&refspec], Some(&mut opts))
        .map_err(|e| Error::PushFailed {
            message: e.message().to_string(),
        })?;

    tracing::info!(remote = %remote_name, branch = %branch, "Pushed branch");
    Ok(())
}
