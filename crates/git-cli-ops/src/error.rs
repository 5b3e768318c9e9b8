use thiserror::Error;

/// Error taxonomy for git CLI execution.
#[derive(Debug, Error)]
pub enum GitCliOpsError {
    #[error("git is not installed")]
    GitNotInstalled,

    #[error("git command failed: {message}")]
    CommandFailed {
        message: String,
        argv: Vec<String>,
        exit_code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("git command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },
}

impl GitCliOpsError {
    /// Stable machine-readable error code for presentation-layer clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GitNotInstalled => "git_not_installed",
            Self::CommandFailed { .. } => "command_failed",
            Self::Timeout { .. } => "timeout",
        }
    }

    /// Captured stderr of the failed command, when there is one.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
