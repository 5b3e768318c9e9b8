//! Progress events streamed to the upload caller.

use serde::Serialize;

/// An event emitted while an upload runs.
///
/// `Info` events arrive in the causal order of the underlying operations;
/// every upload ends with exactly one terminal event (`Success` or `Error`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Output of an intermediate operation.
    Info { message: String },

    /// The upload completed; the pushed files are on the remote.
    Success { message: String },

    /// The upload failed; the workspace has already been released.
    Error { message: String },
}

impl ProgressEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info {
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Get the event type string.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Info { .. } => "info",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    /// Check if this event ends the upload's event stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }

    /// The human-readable message carried by the event.
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message } | Self::Success { message } | Self::Error { message } => message,
        }
    }
}
