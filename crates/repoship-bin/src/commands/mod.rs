//! CLI command implementations.

mod auth;
mod repos;
mod upload;

pub use auth::{auth_login, auth_logout, auth_status};
pub use repos::{repos_create, repos_delete, repos_list};
pub use upload::upload;

use anyhow::Result;
use forge_api_ops::ForgeApiClient;
use tracing::debug;
use uploader_config::{CredentialStore, Paths};

/// Name of the environment variable consulted for the API token.
pub const TOKEN_ENV_VAR: &str = "REPOSHIP_TOKEN";

/// Get the credential store rooted at the default base directory.
pub fn credential_store() -> Result<CredentialStore> {
    let paths = Paths::new()?;
    Ok(CredentialStore::new(&paths))
}

/// Resolve the token: explicit flag, then environment, then stored value.
pub fn resolve_token(flag: Option<&str>) -> Result<String> {
    if let Some(token) = flag.map(str::trim).filter(|token| !token.is_empty()) {
        debug!("using token from --token flag");
        return Ok(token.to_string());
    }

    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            debug!(var = TOKEN_ENV_VAR, "using token from environment");
            return Ok(token);
        }
    }

    if let Some(token) = credential_store()?.load()? {
        debug!("using stored token");
        return Ok(token);
    }

    anyhow::bail!(
        "no token available; pass --token, set {}, or run 'repoship auth login'",
        TOKEN_ENV_VAR
    )
}

/// Get an API client for the default host.
pub fn api_client() -> ForgeApiClient {
    ForgeApiClient::new()
}

/// Ask user for confirmation.
pub fn confirm(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N] ", prompt);
    io::stdout().flush().ok();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
