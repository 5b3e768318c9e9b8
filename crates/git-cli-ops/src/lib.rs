//! # Git CLI Ops
//!
//! Git subprocess execution for the Repoship uploader.
//!
//! Git CLI Ops owns process execution, timeout control, output capture, and
//! error normalization for the `git` invocations the upload workflow issues
//! against its scratch workspace.

mod command_runner;
mod error;
mod executor;
mod operations;

pub use command_runner::{CommandOutput, GitCommandRunner};
pub use error::GitCliOpsError;
pub use executor::GitExecutor;
pub use operations::{
    checkout_new_branch, checkout_tracking_branch, commit, fetch_branch, init, pull_rebase,
    push_set_upstream, remote_add, stage_all, CommitOutcome,
};
