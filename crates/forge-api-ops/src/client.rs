use crate::types::{CreateRepositoryInput, RepoName, RepositorySummary};
use crate::ForgeApiError;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Branch name used when the metadata endpoint cannot be resolved.
///
/// A freshly created repository may not be indexed yet; uploads must still be
/// able to proceed against it, so resolution failure is absorbed here.
pub const FALLBACK_DEFAULT_BRANCH: &str = "main";

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("repoship/", env!("CARGO_PKG_VERSION"));
const PAGE_SIZE: usize = 100;

/// Typed client for the hosting provider's repository endpoints.
#[derive(Debug, Clone)]
pub struct ForgeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ForgeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForgeApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// List every repository the credential can see, concatenating pages in
    /// order until the provider returns an empty page.
    pub async fn list_repositories(
        &self,
        credential: &str,
    ) -> Result<Vec<RepositorySummary>, ForgeApiError> {
        let mut repositories = Vec::new();
        let mut page = 1usize;

        loop {
            let url = format!("{}{}", self.base_url, list_page_path(page));
            let response = self
                .http
                .get(&url)
                .headers(api_headers(credential))
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            let batch: Vec<ApiRepository> = response.json().await.map_err(|err| {
                ForgeApiError::Parse {
                    message: format!("failed to parse repository list page {page}: {err}"),
                }
            })?;

            if batch.is_empty() {
                break;
            }

            repositories.extend(batch.into_iter().map(map_repository));
            page += 1;
        }

        debug!(count = repositories.len(), "listed repositories");
        Ok(repositories)
    }

    pub async fn create_repository(
        &self,
        credential: &str,
        input: &CreateRepositoryInput,
    ) -> Result<RepositorySummary, ForgeApiError> {
        if input.name.trim().is_empty() {
            return Err(ForgeApiError::Validation {
                message: "repository name is required".to_string(),
            });
        }

        let url = format!("{}/user/repos", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(api_headers(credential))
            .json(input)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let created: ApiRepository = response.json().await.map_err(|err| ForgeApiError::Parse {
            message: format!("failed to parse created repository: {err}"),
        })?;

        debug!(repo = %created.full_name, "created repository");
        Ok(map_repository(created))
    }

    pub async fn delete_repository(
        &self,
        credential: &str,
        repo: &RepoName,
    ) -> Result<(), ForgeApiError> {
        let url = format!("{}/repos/{}", self.base_url, repo.full_name());
        let response = self
            .http
            .delete(&url)
            .headers(api_headers(credential))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(repo = %repo, "deleted repository");
        Ok(())
    }

    /// Resolve the repository's default branch.
    ///
    /// Never fails: any resolution problem falls back to
    /// [`FALLBACK_DEFAULT_BRANCH`] so an upload against a freshly created
    /// repository can proceed.
    pub async fn get_default_branch(&self, credential: &str, repo: &RepoName) -> String {
        match self.fetch_default_branch(credential, repo).await {
            Ok(branch) => branch,
            Err(err) => {
                warn!(
                    repo = %repo,
                    error = %err,
                    fallback = FALLBACK_DEFAULT_BRANCH,
                    "could not resolve default branch, using fallback"
                );
                FALLBACK_DEFAULT_BRANCH.to_string()
            }
        }
    }

    async fn fetch_default_branch(
        &self,
        credential: &str,
        repo: &RepoName,
    ) -> Result<String, ForgeApiError> {
        let url = format!("{}/repos/{}", self.base_url, repo.full_name());
        let response = self
            .http
            .get(&url)
            .headers(api_headers(credential))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let repository: ApiRepository =
            response.json().await.map_err(|err| ForgeApiError::Parse {
                message: format!("failed to parse repository metadata: {err}"),
            })?;

        Ok(repository
            .default_branch
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string()))
    }
}

fn api_headers(credential: &str) -> reqwest::header::HeaderMap {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT as UA};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
    headers.insert(UA, HeaderValue::from_static(USER_AGENT));
    if let Ok(value) = HeaderValue::from_str(&format!("token {credential}")) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}

fn list_page_path(page: usize) -> String {
    format!("/user/repos?page={page}&per_page={PAGE_SIZE}")
}

async fn error_from_response(response: reqwest::Response) -> ForgeApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = extract_api_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
    map_status(status, message)
}

/// Pull the provider's `message` field out of an error body, verbatim.
fn extract_api_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        message: String,
    }

    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|parsed| parsed.message)
}

fn map_status(status: u16, message: String) -> ForgeApiError {
    match status {
        401 => ForgeApiError::Auth { message },
        403 if message.to_ascii_lowercase().contains("rate limit") => {
            ForgeApiError::RateLimit { message }
        }
        403 => ForgeApiError::Auth { message },
        404 => ForgeApiError::NotFound { message },
        422 => ForgeApiError::Validation { message },
        _ => ForgeApiError::Api { status, message },
    }
}

#[derive(Debug, Deserialize)]
struct ApiRepository {
    full_name: String,
    #[serde(default)]
    private: bool,
    default_branch: Option<String>,
    clone_url: Option<String>,
}

fn map_repository(repo: ApiRepository) -> RepositorySummary {
    let clone_url = repo
        .clone_url
        .unwrap_or_else(|| format!("https://github.com/{}.git", repo.full_name));

    RepositorySummary {
        is_private: repo.private,
        default_branch: repo
            .default_branch
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string()),
        clone_url,
        full_name: repo.full_name,
    }
}
