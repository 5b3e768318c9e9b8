use crate::UploadError;
use forge_api_ops::RepoName;
use std::path::PathBuf;

/// Commit message used when the caller does not provide one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Add new files";

/// One upload: a set of local paths bound for a hosted repository.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Files and/or directories to stage, in order. Later entries win on
    /// name collisions.
    pub source_paths: Vec<PathBuf>,
    pub repository: RepoName,
    /// Opaque bearer token used for both API calls and the push.
    pub credential: String,
    pub commit_message: String,
}

impl UploadRequest {
    pub fn new(source_paths: Vec<PathBuf>, repository: RepoName, credential: String) -> Self {
        Self {
            source_paths,
            repository,
            credential,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.trim().is_empty() {
            self.commit_message = message;
        }
        self
    }

    /// Fail fast on a malformed request, before any workspace exists.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.source_paths.is_empty() {
            return Err(UploadError::InvalidRequest {
                message: "at least one source path is required".to_string(),
            });
        }

        for path in &self.source_paths {
            if !path.exists() {
                return Err(UploadError::InvalidRequest {
                    message: format!("source path does not exist: {}", path.display()),
                });
            }
        }

        Ok(())
    }
}
