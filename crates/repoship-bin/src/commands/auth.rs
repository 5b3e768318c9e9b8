//! Token persistence commands.

use super::credential_store;
use crate::output::{self, OutputFormat};
use anyhow::Result;

/// Store the API token.
pub fn auth_login(token: &str, format: &OutputFormat) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("token must not be empty");
    }

    credential_store()?.save(token)?;
    output::print_success("Token saved", format);
    Ok(())
}

/// Remove the stored API token.
pub fn auth_logout(format: &OutputFormat) -> Result<()> {
    credential_store()?.clear()?;
    output::print_success("Token cleared", format);
    Ok(())
}

/// Report whether a token is stored.
pub fn auth_status(format: &OutputFormat) -> Result<()> {
    let stored = credential_store()?.load()?.is_some();
    match format {
        OutputFormat::Text => {
            if stored {
                println!("A token is stored");
            } else {
                println!("No token stored");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "token_stored": stored }));
        }
    }
    Ok(())
}
