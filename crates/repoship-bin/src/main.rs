//! Repoship CLI - upload files and folders to GitHub repositories.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Repoship - manage GitHub repositories and push local files into them.
#[derive(Parser)]
#[command(name = "repoship")]
#[command(about = "Upload files and folders to GitHub repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API token (falls back to REPOSHIP_TOKEN, then the stored token)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files or folders into a repository
    Upload {
        /// Files and/or directories to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Target repository as owner/name
        #[arg(short, long)]
        repo: String,

        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Manage repositories
    Repos {
        #[command(subcommand)]
        command: RepoCommands,
    },

    /// Manage the stored API token
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// List repositories visible to the token
    List,
    /// Create a repository
    Create {
        /// Repository name
        name: String,
        /// Repository description
        #[arg(short, long)]
        description: Option<String>,
        /// Create a private repository
        #[arg(long)]
        private: bool,
        /// Initialize with a README
        #[arg(long)]
        init_readme: bool,
    },
    /// Delete a repository
    Delete {
        /// Repository as owner/name
        repository: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Store an API token
    Login {
        /// The token to store
        #[arg(long)]
        token: String,
    },
    /// Remove the stored token
    Logout,
    /// Show whether a token is stored
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    uploader_config::init_logging(&cli.log_level);

    let token = cli.token.as_deref();
    let result = match cli.command {
        Commands::Upload {
            paths,
            repo,
            message,
        } => commands::upload(token, paths, &repo, message.as_deref(), &cli.format).await,
        Commands::Repos { command } => match command {
            RepoCommands::List => commands::repos_list(token, &cli.format).await,
            RepoCommands::Create {
                name,
                description,
                private,
                init_readme,
            } => {
                commands::repos_create(
                    token,
                    &name,
                    description.as_deref(),
                    private,
                    init_readme,
                    &cli.format,
                )
                .await
            }
            RepoCommands::Delete { repository, yes } => {
                commands::repos_delete(token, &repository, yes, &cli.format).await
            }
        },
        Commands::Auth { command } => match command {
            AuthCommands::Login { token: new_token } => {
                commands::auth_login(&new_token, &cli.format)
            }
            AuthCommands::Logout => commands::auth_logout(&cli.format),
            AuthCommands::Status => commands::auth_status(&cli.format),
        },
    };

    if let Err(err) = result {
        output::print_error(&err.to_string(), &cli.format);
        std::process::exit(1);
    }
}
