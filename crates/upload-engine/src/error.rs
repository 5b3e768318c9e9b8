use git_cli_ops::GitCliOpsError;
use thiserror::Error;

/// Error taxonomy for one upload invocation.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request failed validation; no workspace was created.
    #[error("invalid upload request: {message}")]
    InvalidRequest { message: String },

    /// The scratch workspace could not be acquired.
    #[error("workspace error: {message}")]
    Workspace { message: String },

    /// Copying a source path into the workspace failed.
    #[error("staging failed: {message}")]
    Staging { message: String },

    /// A git invocation outside the push-retry path failed.
    #[error(transparent)]
    Command(#[from] GitCliOpsError),

    /// The push failed even after the single pull-rebase retry.
    #[error("push failed: {message}")]
    Push { message: String, stderr: String },

    /// The caller cancelled the upload between steps.
    #[error("upload cancelled")]
    Cancelled,
}

impl UploadError {
    /// Stable machine-readable error code for presentation-layer clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Workspace { .. } => "workspace",
            Self::Staging { .. } => "staging",
            Self::Command(_) => "command_failed",
            Self::Push { .. } => "push_failed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Error returned by [`crate::UploadService::submit`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The bounded job queue is saturated; try again after the in-flight
    /// upload finishes.
    #[error("upload queue is full")]
    QueueFull,

    /// The worker task has shut down.
    #[error("upload service is no longer running")]
    Closed,
}
