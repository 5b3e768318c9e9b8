use crate::{CommandOutput, GitCliOpsError, GitCommandRunner};
use async_trait::async_trait;
use std::path::Path;

/// Seam over git execution.
///
/// The upload workflow talks to git only through this trait, so orchestration
/// can be exercised without spawning processes.
#[async_trait]
pub trait GitExecutor: Send + Sync {
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<CommandOutput, GitCliOpsError>;
}

#[async_trait]
impl GitExecutor for GitCommandRunner {
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<CommandOutput, GitCliOpsError> {
        GitCommandRunner::run(self, working_dir, args, timeout_secs).await
    }
}
