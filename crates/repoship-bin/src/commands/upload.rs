//! The upload command: submit a request and stream its progress events.

use super::resolve_token;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use forge_api_ops::{ForgeApiClient, RepoName};
use git_cli_ops::GitCommandRunner;
use std::path::PathBuf;
use std::sync::Arc;
use upload_engine::{ProgressEvent, UploadRequest, UploadService, UploadServiceConfig};

/// Upload files/folders into a repository and render progress until the
/// terminal event.
pub async fn upload(
    token: Option<&str>,
    paths: Vec<PathBuf>,
    repository: &str,
    message: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let token = resolve_token(token)?;
    let repo = RepoName::parse(repository)?;

    let mut request = UploadRequest::new(paths, repo, token);
    if let Some(message) = message {
        request = request.with_commit_message(message);
    }

    let service = UploadService::new(
        Arc::new(GitCommandRunner::new()),
        Arc::new(ForgeApiClient::new()),
        UploadServiceConfig::default(),
    );
    service.start();

    let mut handle = service
        .submit(request)
        .map_err(|err| anyhow::anyhow!("could not submit upload: {err}"))?;

    let mut failed = false;
    while let Some(event) = handle.next_event().await {
        match format {
            OutputFormat::Text => match &event {
                ProgressEvent::Info { message } => println!("  {}", message),
                ProgressEvent::Success { message } => output::print_success(message, format),
                ProgressEvent::Error { message } => output::print_error(message, format),
            },
            OutputFormat::Json => println!("{}", serde_json::to_string(&event)?),
        }

        if matches!(event, ProgressEvent::Error { .. }) {
            failed = true;
        }

        if event.is_terminal() {
            break;
        }
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
