#![allow(dead_code)]

use async_trait::async_trait;
use forge_api_ops::RepoName;
use git_cli_ops::{CommandOutput, GitCliOpsError, GitExecutor};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use upload_engine::DefaultBranchSource;

/// Branch source that always resolves to a fixed name, standing in for both
/// a healthy metadata call and the client's `"main"` fallback.
pub struct FixedBranch(pub &'static str);

#[async_trait]
impl DefaultBranchSource for FixedBranch {
    async fn default_branch(&self, _credential: &str, _repo: &RepoName) -> String {
        self.0.to_string()
    }
}

/// Recording git fake with scripted failures.
///
/// Records every invocation (working directory + argv) so tests can assert
/// on the exact command sequence the workflow issued.
#[derive(Default)]
pub struct FakeGit {
    pub calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    pub fail_fetch: bool,
    /// Fail this many pushes before letting one succeed.
    pub push_failures_before_success: usize,
    pub fail_all_pushes: bool,
    pub push_stderr: String,
    /// Whether `status --porcelain` reports staged changes.
    pub dirty_worktree: bool,
    pub push_attempts: AtomicUsize,
}

impl FakeGit {
    pub fn clean_run() -> Self {
        Self {
            dirty_worktree: true,
            ..Self::default()
        }
    }

    pub fn recorded_calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(_, argv)| argv.clone())
            .collect()
    }

    pub fn recorded_dirs(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(dir, _)| dir.clone())
            .collect()
    }

    pub fn count_of(&self, subcommand: &str) -> usize {
        self.recorded_calls()
            .iter()
            .filter(|argv| argv.first().map(String::as_str) == Some(subcommand))
            .count()
    }

    fn ok(text: &str) -> CommandOutput {
        CommandOutput {
            exit_code: Some(0),
            stdout: text.to_string(),
            stderr: String::new(),
        }
    }

    fn failed(args: &[String], stderr: &str) -> GitCliOpsError {
        GitCliOpsError::CommandFailed {
            message: format!("`git {}` failed: {stderr}", args.join(" ")),
            argv: args.to_vec(),
            exit_code: Some(1),
            stderr: stderr.to_string(),
            stdout: String::new(),
        }
    }
}

#[async_trait]
impl GitExecutor for FakeGit {
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        _timeout_secs: u64,
    ) -> Result<CommandOutput, GitCliOpsError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((working_dir.to_path_buf(), args.to_vec()));

        match args.first().map(String::as_str) {
            Some("fetch") if self.fail_fetch => {
                Err(Self::failed(args, "couldn't find remote ref main"))
            }
            Some("status") => Ok(Self::ok(if self.dirty_worktree {
                "?? staged.txt"
            } else {
                ""
            })),
            Some("push") => {
                let attempt = self.push_attempts.fetch_add(1, Ordering::SeqCst);
                if self.fail_all_pushes || attempt < self.push_failures_before_success {
                    Err(Self::failed(args, &self.push_stderr))
                } else {
                    Ok(Self::ok("branch pushed"))
                }
            }
            _ => Ok(Self::ok("")),
        }
    }
}

pub fn repo() -> RepoName {
    RepoName::parse("alice/project").expect("repo name")
}

/// A request whose single source file exists in `dir`.
pub fn request_with_file(dir: &Path) -> upload_engine::UploadRequest {
    let file = dir.join("notes.txt");
    std::fs::write(&file, "hello\n").expect("write source file");
    upload_engine::UploadRequest::new(vec![file], repo(), "token".to_string())
}
