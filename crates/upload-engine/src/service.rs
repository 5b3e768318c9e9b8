//! Queued upload execution.
//!
//! The service accepts uploads without blocking and runs them on one worker
//! task, strictly one at a time, each against a fresh workspace. A second
//! upload submitted while one is in flight waits in the bounded queue; a
//! saturated queue rejects the submission.

use crate::branch::DefaultBranchSource;
use crate::event::ProgressEvent;
use crate::request::UploadRequest;
use crate::workflow::{run_upload, UploadWorkflowConfig};
use crate::SubmitError;
use git_cli_ops::GitExecutor;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const DEFAULT_QUEUE_CAPACITY: usize = 8;
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Configuration for the upload service.
#[derive(Debug, Clone)]
pub struct UploadServiceConfig {
    pub workflow: UploadWorkflowConfig,
    /// Uploads that may wait behind the in-flight one.
    pub queue_capacity: usize,
    /// Buffered progress events per upload.
    pub event_capacity: usize,
}

impl Default for UploadServiceConfig {
    fn default() -> Self {
        Self {
            workflow: UploadWorkflowConfig::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

struct UploadJob {
    request: UploadRequest,
    events: mpsc::Sender<ProgressEvent>,
    cancel: CancellationToken,
}

/// Caller's side of one submitted upload.
pub struct UploadHandle {
    events: mpsc::Receiver<ProgressEvent>,
    cancel: CancellationToken,
}

impl UploadHandle {
    /// Next progress event; `None` once the channel closes after the
    /// terminal event.
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// Request cooperative cancellation; the workflow stops at the next step
    /// boundary and still releases its workspace.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Upload service worker.
pub struct UploadService {
    git: Arc<dyn GitExecutor>,
    branches: Arc<dyn DefaultBranchSource>,
    config: UploadServiceConfig,
    sender: mpsc::Sender<UploadJob>,
    receiver: Mutex<Option<mpsc::Receiver<UploadJob>>>,
}

impl UploadService {
    pub fn new(
        git: Arc<dyn GitExecutor>,
        branches: Arc<dyn DefaultBranchSource>,
        config: UploadServiceConfig,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        Self {
            git,
            branches,
            config,
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    /// Start the worker loop.
    pub fn start(&self) {
        let mut receiver = self
            .receiver
            .lock()
            .expect("lock poisoned")
            .take()
            .expect("UploadService already started");

        let git = self.git.clone();
        let branches = self.branches.clone();
        let workflow_config = self.config.workflow.clone();

        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                let outcome = run_upload(
                    git.as_ref(),
                    branches.as_ref(),
                    &workflow_config,
                    &job.request,
                    &job.events,
                    &job.cancel,
                )
                .await;

                let terminal = match outcome {
                    Ok(message) => ProgressEvent::success(message),
                    Err(err) => {
                        warn!(code = err.code(), error = %err, "upload failed");
                        ProgressEvent::error(err.to_string())
                    }
                };

                if job.events.send(terminal).await.is_err() {
                    debug!("upload events receiver dropped before terminal event");
                }
            }
        });
    }

    /// Enqueue an upload without blocking.
    ///
    /// Validation happens inside the workflow so the failure still arrives as
    /// the handle's terminal event; a full queue is rejected here instead.
    pub fn submit(&self, request: UploadRequest) -> Result<UploadHandle, SubmitError> {
        let (events_tx, events_rx) = mpsc::channel(self.config.event_capacity);
        let cancel = CancellationToken::new();

        let job = UploadJob {
            request,
            events: events_tx,
            cancel: cancel.clone(),
        };

        self.sender.try_send(job).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => SubmitError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })?;

        Ok(UploadHandle {
            events: events_rx,
            cancel,
        })
    }
}
