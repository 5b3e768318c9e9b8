//! Repository management commands.

use super::{api_client, confirm, resolve_token};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use forge_api_ops::{CreateRepositoryInput, RepoName};

/// List repositories visible to the token.
pub async fn repos_list(token: Option<&str>, format: &OutputFormat) -> Result<()> {
    let token = resolve_token(token)?;
    let repositories = api_client().list_repositories(&token).await?;

    match format {
        OutputFormat::Text => {
            if repositories.is_empty() {
                println!("No repositories found");
            } else {
                println!("{:<50} {:<10} {}", "Name", "Visibility", "Default branch");
                println!("{}", "-".repeat(80));
                for repo in &repositories {
                    let visibility = if repo.is_private { "private" } else { "public" };
                    println!(
                        "{:<50} {:<10} {}",
                        repo.full_name, visibility, repo.default_branch
                    );
                }
                println!("{} repositories", repositories.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&repositories)?);
        }
    }

    Ok(())
}

/// Create a repository.
pub async fn repos_create(
    token: Option<&str>,
    name: &str,
    description: Option<&str>,
    private: bool,
    init_readme: bool,
    format: &OutputFormat,
) -> Result<()> {
    let token = resolve_token(token)?;

    let input = CreateRepositoryInput {
        name: name.to_string(),
        description: description.map(str::to_string),
        private,
        auto_init: init_readme,
    };

    let created = api_client().create_repository(&token, &input).await?;
    match format {
        OutputFormat::Text => {
            output::print_success(&format!("Created repository {}", created.full_name), format)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
    }

    Ok(())
}

/// Delete a repository. Destructive, so it asks first unless `--yes`.
pub async fn repos_delete(
    token: Option<&str>,
    repository: &str,
    yes: bool,
    format: &OutputFormat,
) -> Result<()> {
    let repo = RepoName::parse(repository)?;

    if !yes
        && !confirm(&format!(
            "Delete repository {}? This cannot be undone.",
            repo
        ))
    {
        output::print_error("aborted", format);
        return Ok(());
    }

    let token = resolve_token(token)?;
    api_client().delete_repository(&token, &repo).await?;
    output::print_success(&format!("Deleted repository {}", repo), format);

    Ok(())
}
