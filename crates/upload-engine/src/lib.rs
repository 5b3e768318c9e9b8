//! # Upload Engine
//!
//! Orchestration core for pushing local files into a hosted repository.
//!
//! One upload runs as a strictly sequential state machine inside an
//! ephemeral git workspace: validate the request, initialize a working tree
//! bound to the remote, reconcile with the remote default branch, stage the
//! requested files, commit, and push with a single pull-rebase retry. The
//! workspace is removed on every exit path, and progress streams to the
//! caller as a typed event sequence ending in exactly one terminal event.

mod branch;
mod error;
mod event;
mod request;
mod service;
mod staging;
mod workflow;
mod workspace;

pub use branch::DefaultBranchSource;
pub use error::{SubmitError, UploadError};
pub use event::ProgressEvent;
pub use request::{UploadRequest, DEFAULT_COMMIT_MESSAGE};
pub use service::{UploadHandle, UploadService, UploadServiceConfig};
pub use staging::stage_sources;
pub use workflow::{run_upload, UploadWorkflowConfig};
pub use workspace::UploadWorkspace;
