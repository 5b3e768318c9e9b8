//! The upload state machine.
//!
//! One invocation runs strictly sequentially: every step depends on the
//! working-tree state left by the previous one. The suspension points are
//! the git subprocesses and the single default-branch API call.

use crate::branch::DefaultBranchSource;
use crate::event::ProgressEvent;
use crate::request::UploadRequest;
use crate::staging::stage_sources;
use crate::workspace::UploadWorkspace;
use crate::UploadError;
use forge_api_ops::RepoName;
use git_cli_ops::{
    checkout_new_branch, checkout_tracking_branch, commit, fetch_branch, init, pull_rebase,
    push_set_upstream, remote_add, stage_all, CommandOutput, CommitOutcome, GitCliOpsError,
    GitExecutor,
};
use std::path::Path;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Tunables for one workflow run.
#[derive(Debug, Clone)]
pub struct UploadWorkflowConfig {
    /// Base URL the remote repository lives under. HTTP(S) bases get the
    /// credential embedded as userinfo; other schemes (`file://` in tests)
    /// are used verbatim.
    pub remote_base: String,
    /// Name the remote is registered under in the workspace.
    pub remote_name: String,
}

impl Default for UploadWorkflowConfig {
    fn default() -> Self {
        Self {
            remote_base: "https://github.com".to_string(),
            remote_name: "origin".to_string(),
        }
    }
}

/// Run one upload to completion.
///
/// Emits an `Info` event for each intermediate operation's output, in causal
/// order. Returns the success message for the terminal event; the caller
/// (the service worker) emits the terminal `Success`/`Error` itself so there
/// is exactly one per run. The workspace is released on every path out,
/// including cancellation.
pub async fn run_upload(
    git: &dyn GitExecutor,
    branches: &dyn DefaultBranchSource,
    config: &UploadWorkflowConfig,
    request: &UploadRequest,
    events: &mpsc::Sender<ProgressEvent>,
    cancel: &CancellationToken,
) -> Result<String, UploadError> {
    request.validate()?;
    ensure_live(cancel)?;

    let workspace = UploadWorkspace::create()?;
    let outcome = drive(git, branches, config, request, events, cancel, workspace.path()).await;
    workspace.close();
    outcome
}

#[allow(clippy::too_many_arguments)]
async fn drive(
    git: &dyn GitExecutor,
    branches: &dyn DefaultBranchSource,
    config: &UploadWorkflowConfig,
    request: &UploadRequest,
    events: &mpsc::Sender<ProgressEvent>,
    cancel: &CancellationToken,
    dir: &Path,
) -> Result<String, UploadError> {
    let remote = config.remote_name.as_str();

    emit(events, init(git, dir).await?).await;
    let url = build_remote_url(&config.remote_base, &request.repository, &request.credential);
    emit(events, remote_add(git, dir, remote, &url).await?).await;
    ensure_live(cancel)?;

    let branch = branches
        .default_branch(&request.credential, &request.repository)
        .await;
    ensure_live(cancel)?;

    synchronize(git, dir, remote, &branch, events).await?;
    ensure_live(cancel)?;

    stage_sources(dir, &request.source_paths)?;
    ensure_live(cancel)?;

    emit(events, stage_all(git, dir).await?).await;
    match commit(git, dir, &request.commit_message).await? {
        CommitOutcome::Created(output) => emit(events, output).await,
        CommitOutcome::NothingToCommit => {
            send_info(events, "nothing to commit; continuing to push").await;
        }
    }
    ensure_live(cancel)?;

    push_with_rebase_retry(git, dir, remote, &branch, events).await?;

    Ok(format!(
        "uploaded to {} on branch {}",
        request.repository, branch
    ))
}

/// Reconcile the workspace with the remote branch.
///
/// Fetch-then-checkout-tracking is the path for a repository with history.
/// Its failure is the expected empty-repository case, absorbed by creating a
/// fresh local branch with no tracking relationship.
async fn synchronize(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
    events: &mpsc::Sender<ProgressEvent>,
) -> Result<(), UploadError> {
    match sync_with_remote(git, dir, remote, branch).await {
        Ok(outputs) => {
            for output in outputs {
                emit(events, output).await;
            }
        }
        Err(err) => {
            debug!(
                branch,
                error = %err,
                "remote branch unavailable; starting a fresh local branch"
            );
            emit(events, checkout_new_branch(git, dir, branch).await?).await;
        }
    }

    Ok(())
}

async fn sync_with_remote(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
) -> Result<Vec<CommandOutput>, GitCliOpsError> {
    let fetched = fetch_branch(git, dir, remote, branch).await?;
    let checked_out = checkout_tracking_branch(git, dir, remote, branch).await?;
    Ok(vec![fetched, checked_out])
}

/// Push, allowing exactly one pull-rebase retry.
///
/// The first failure is swallowed in favor of the retry regardless of its
/// cause; only the retry's failure surfaces, as `Push` with the underlying
/// stderr.
async fn push_with_rebase_retry(
    git: &dyn GitExecutor,
    dir: &Path,
    remote: &str,
    branch: &str,
    events: &mpsc::Sender<ProgressEvent>,
) -> Result<(), UploadError> {
    match push_set_upstream(git, dir, remote, branch).await {
        Ok(output) => {
            emit(events, output).await;
            Ok(())
        }
        Err(first_err) => {
            debug!(
                branch,
                error = %first_err,
                "push rejected; rebasing onto the remote before the single retry"
            );

            let rebased = pull_rebase(git, dir, remote, branch)
                .await
                .map_err(push_error)?;
            emit(events, rebased).await;

            let retried = push_set_upstream(git, dir, remote, branch)
                .await
                .map_err(push_error)?;
            emit(events, retried).await;
            Ok(())
        }
    }
}

fn push_error(err: GitCliOpsError) -> UploadError {
    let stderr = err.stderr().unwrap_or_default().to_string();
    UploadError::Push {
        message: err.to_string(),
        stderr,
    }
}

/// Remote URL with the credential embedded as userinfo, so every later
/// network operation in the workspace authenticates transparently.
fn build_remote_url(remote_base: &str, repo: &RepoName, credential: &str) -> String {
    let base = remote_base.trim_end_matches('/');

    for scheme in ["https://", "http://"] {
        if let Some(host) = base.strip_prefix(scheme) {
            if credential.is_empty() {
                return format!("{scheme}{host}/{repo}.git");
            }
            let token = urlencoding::encode(credential);
            return format!("{scheme}{token}@{host}/{repo}.git");
        }
    }

    format!("{base}/{repo}.git")
}

fn ensure_live(cancel: &CancellationToken) -> Result<(), UploadError> {
    if cancel.is_cancelled() {
        Err(UploadError::Cancelled)
    } else {
        Ok(())
    }
}

async fn emit(events: &mpsc::Sender<ProgressEvent>, output: CommandOutput) {
    let text = output.progress_text();
    if text.is_empty() {
        return;
    }
    send_info(events, text).await;
}

async fn send_info(events: &mpsc::Sender<ProgressEvent>, message: &str) {
    if events.send(ProgressEvent::info(message)).await.is_err() {
        debug!("progress receiver dropped");
    }
}
