#![allow(dead_code)]

use git_cli_ops::GitCommandRunner;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Whether a usable git binary is present. Tests that spawn git call this
/// first and return early when the environment has none.
pub async fn git_available() -> bool {
    let runner = GitCommandRunner::new();
    let dir = std::env::temp_dir();
    runner
        .run(&dir, &["--version".to_string()], 30)
        .await
        .is_ok()
}

/// Create an empty temp directory with an initialized repository and an
/// identity configured so commits work on pristine CI machines.
pub async fn init_test_repo(runner: &GitCommandRunner) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let repo_path = dir.path().to_path_buf();

    run(runner, &repo_path, &["init"]).await;
    configure_identity(runner, &repo_path).await;

    (dir, repo_path)
}

pub async fn configure_identity(runner: &GitCommandRunner, repo_path: &Path) {
    run(runner, repo_path, &["config", "user.name", "Test User"]).await;
    run(runner, repo_path, &["config", "user.email", "test@example.com"]).await;
}

pub async fn run(runner: &GitCommandRunner, repo_path: &Path, args: &[&str]) {
    let argv: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    runner
        .run(repo_path, &argv, 30)
        .await
        .unwrap_or_else(|err| panic!("`git {}` failed: {err}", args.join(" ")));
}

pub fn create_file(repo_path: &Path, name: &str, content: &str) {
    let file_path = repo_path.join(name);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    std::fs::write(&file_path, content).expect("failed to write file");
}
