use crate::GitCliOpsError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Captured output from a completed git subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Single-line progress text: stdout when present, stderr otherwise.
    pub fn progress_text(&self) -> &str {
        if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

/// Responsible for locating and executing the git CLI.
#[derive(Debug, Clone)]
pub struct GitCommandRunner {
    executable: String,
}

impl Default for GitCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCommandRunner {
    pub fn new() -> Self {
        Self {
            executable: resolve_git_executable(),
        }
    }

    /// Run a git subcommand in `working_dir`, capturing both streams.
    ///
    /// Returns `Ok` only for a zero exit. A non-zero exit always carries the
    /// full argv and captured stderr so callers can decide on fallbacks
    /// without re-running anything.
    pub async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<CommandOutput, GitCliOpsError> {
        let command_repr = format!("{} {}", self.executable, args.join(" "));
        debug!(command = %command_repr, dir = %working_dir.display(), "running git command");

        let mut cmd = Command::new(&self.executable);
        cmd.args(args);
        cmd.current_dir(working_dir);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        apply_non_interactive_env(&mut cmd);

        let output = match timeout(Duration::from_secs(timeout_secs), cmd.output()).await {
            Err(_) => {
                return Err(GitCliOpsError::Timeout {
                    command: command_repr,
                    timeout_secs,
                });
            }
            Ok(Err(err)) => {
                return if err.kind() == std::io::ErrorKind::NotFound {
                    Err(GitCliOpsError::GitNotInstalled)
                } else {
                    Err(GitCliOpsError::CommandFailed {
                        message: format!("failed to execute git command: {err}"),
                        argv: args.to_vec(),
                        exit_code: None,
                        stderr: String::new(),
                        stdout: String::new(),
                    })
                };
            }
            Ok(Ok(output)) => output,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let exit_code = output.status.code();

        if output.status.success() {
            return Ok(CommandOutput {
                exit_code,
                stdout,
                stderr,
            });
        }

        Err(GitCliOpsError::CommandFailed {
            message: failure_message(args, exit_code, &stderr, &stdout),
            argv: args.to_vec(),
            exit_code,
            stderr,
            stdout,
        })
    }
}

fn apply_non_interactive_env(cmd: &mut Command) {
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("GIT_PAGER", "cat");
    cmd.env("PAGER", "cat");
    cmd.env("NO_COLOR", "1");
}

fn resolve_git_executable() -> String {
    if let Ok(path) = std::env::var("GIT_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    for candidate in ["/opt/homebrew/bin/git", "/usr/local/bin/git", "/usr/bin/git"] {
        if Path::new(candidate).exists() {
            return candidate.to_string();
        }
    }

    "git".to_string()
}

fn failure_message(args: &[String], exit_code: Option<i32>, stderr: &str, stdout: &str) -> String {
    let detail = if !stderr.trim().is_empty() {
        stderr.to_string()
    } else if !stdout.trim().is_empty() {
        stdout.to_string()
    } else {
        format!("exit code {:?}", exit_code)
    };

    format!("`git {}` failed: {}", args.join(" "), detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_text_prefers_stdout() {
        let output = CommandOutput {
            exit_code: Some(0),
            stdout: "Switched to a new branch 'main'".to_string(),
            stderr: "warning: something".to_string(),
        };
        assert_eq!(output.progress_text(), "Switched to a new branch 'main'");
    }

    #[test]
    fn progress_text_falls_back_to_stderr() {
        let output = CommandOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: "From https://example.com/repo".to_string(),
        };
        assert_eq!(output.progress_text(), "From https://example.com/repo");
    }

    #[test]
    fn failure_message_prefers_stderr() {
        let args = vec!["push".to_string()];
        let message = failure_message(&args, Some(1), "rejected", "");
        assert_eq!(message, "`git push` failed: rejected");
    }

    #[test]
    fn failure_message_uses_exit_code_when_streams_empty() {
        let args = vec!["push".to_string()];
        let message = failure_message(&args, Some(128), "", "");
        assert!(message.contains("128"));
    }

    #[test]
    fn picks_git_path_env_when_set() {
        std::env::set_var("GIT_PATH", "/custom/git");
        let resolved = resolve_git_executable();
        std::env::remove_var("GIT_PATH");
        assert_eq!(resolved, "/custom/git");
    }
}
