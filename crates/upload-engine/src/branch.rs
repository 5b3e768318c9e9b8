use async_trait::async_trait;
use forge_api_ops::{ForgeApiClient, RepoName};

/// Where the workflow learns the remote's default branch.
///
/// Implementations are infallible: resolution problems fall back to a usable
/// branch name (`"main"`) so an upload against an empty or freshly created
/// repository can proceed.
#[async_trait]
pub trait DefaultBranchSource: Send + Sync {
    async fn default_branch(&self, credential: &str, repo: &RepoName) -> String;
}

#[async_trait]
impl DefaultBranchSource for ForgeApiClient {
    async fn default_branch(&self, credential: &str, repo: &RepoName) -> String {
        self.get_default_branch(credential, repo).await
    }
}
