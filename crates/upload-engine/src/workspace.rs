use crate::UploadError;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, warn};

/// Ephemeral scratch directory holding one upload's working tree.
///
/// Owned exclusively by the running workflow invocation. Removal is
/// drop-guaranteed, so every exit path out of the state machine — success,
/// failure, cancellation, panic — releases the directory.
pub struct UploadWorkspace {
    dir: TempDir,
}

impl UploadWorkspace {
    pub fn create() -> Result<Self, UploadError> {
        let dir = tempfile::Builder::new()
            .prefix("repoship-upload-")
            .tempdir()
            .map_err(|err| UploadError::Workspace {
                message: format!("failed to create upload workspace: {err}"),
            })?;

        debug!(path = %dir.path().display(), "created upload workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace now, logging instead of failing when the
    /// filesystem refuses; the upload outcome is already decided by the time
    /// this runs.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(path = %path.display(), "removed upload workspace"),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to remove upload workspace")
            }
        }
    }
}
