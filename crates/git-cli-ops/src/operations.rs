//! Typed git operations used by the upload workflow.

use crate::{CommandOutput, GitCliOpsError, GitExecutor};
use std::path::Path;

const TIMEOUT_LOCAL_SECS: u64 = 30;
const TIMEOUT_NETWORK_SECS: u64 = 300;

/// Outcome of a commit attempt.
#[derive(Debug)]
pub enum CommitOutcome {
    /// A commit was created.
    Created(CommandOutput),
    /// The staged tree already matches HEAD; nothing to record.
    NothingToCommit,
}

pub async fn init(git: &dyn GitExecutor, dir: &Path) -> Result<CommandOutput, GitCliOpsError> {
    git.run(dir, &argv(&["init"]), TIMEOUT_LOCAL_SECS).await
}

pub async fn remote_add(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    url: &str,
) -> Result<CommandOutput, GitCliOpsError> {
    git.run(dir, &argv(&["remote", "add", remote, url]), TIMEOUT_LOCAL_SECS)
        .await
}

pub async fn fetch_branch(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
) -> Result<CommandOutput, GitCliOpsError> {
    git.run(dir, &argv(&["fetch", remote, branch]), TIMEOUT_NETWORK_SECS)
        .await
}

/// Create `branch` tracking `remote/branch`. Only valid after a successful fetch.
pub async fn checkout_tracking_branch(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
) -> Result<CommandOutput, GitCliOpsError> {
    let upstream = format!("{remote}/{branch}");
    git.run(
        dir,
        &argv(&["checkout", "-b", branch, &upstream]),
        TIMEOUT_LOCAL_SECS,
    )
    .await
}

/// Create `branch` with no tracking relationship (empty or unborn remote).
pub async fn checkout_new_branch(
    git: &dyn GitExecutor,
    dir: &Path,
    branch: &str,
) -> Result<CommandOutput, GitCliOpsError> {
    git.run(dir, &argv(&["checkout", "-b", branch]), TIMEOUT_LOCAL_SECS)
        .await
}

pub async fn stage_all(git: &dyn GitExecutor, dir: &Path) -> Result<CommandOutput, GitCliOpsError> {
    git.run(dir, &argv(&["add", "."]), TIMEOUT_LOCAL_SECS).await
}

/// Commit staged changes, reporting a clean tree as an outcome rather than an
/// error so idempotent re-uploads can continue to the push step.
pub async fn commit(
    git: &dyn GitExecutor,
    dir: &Path,
    message: &str,
) -> Result<CommitOutcome, GitCliOpsError> {
    let status = git
        .run(dir, &argv(&["status", "--porcelain"]), TIMEOUT_LOCAL_SECS)
        .await?;

    if worktree_is_clean(&status.stdout) {
        return Ok(CommitOutcome::NothingToCommit);
    }

    let output = git
        .run(dir, &argv(&["commit", "-m", message]), TIMEOUT_LOCAL_SECS)
        .await?;
    Ok(CommitOutcome::Created(output))
}

pub async fn push_set_upstream(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
) -> Result<CommandOutput, GitCliOpsError> {
    git.run(
        dir,
        &argv(&["push", "-u", remote, branch]),
        TIMEOUT_NETWORK_SECS,
    )
    .await
}

pub async fn pull_rebase(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
) -> Result<CommandOutput, GitCliOpsError> {
    git.run(
        dir,
        &argv(&["pull", "--rebase", remote, branch]),
        TIMEOUT_NETWORK_SECS,
    )
    .await
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn worktree_is_clean(status_stdout: &str) -> bool {
    status_stdout.trim().is_empty()
}
