use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;

pub type RequestId = u64;
pub type NotificationId = u64;

/// One file to be sent in the batch upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Batch packaged, upload request issued.
    UploadStarted { request: RequestId },
    SubmitCompleted {
        request: RequestId,
        result: Result<(), ServiceError>,
    },
    DownloadCompleted {
        request: RequestId,
        result: Result<Bytes, ServiceError>,
    },
    CleanupCompleted {
        request: RequestId,
        result: Result<(), ServiceError>,
    },
    NotificationExpired { id: NotificationId },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
    /// The `error` field of the server's JSON reply, when there was one.
    pub server_message: Option<String>,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn rejected(status: u16, server_message: Option<String>) -> Self {
        Self {
            kind: FailureKind::Rejected { status },
            message: format!("request failed with status {status}"),
            server_message,
        }
    }

    /// Text worth showing to the user.
    ///
    /// Transport faults yield `None` so they settle exactly like a failure
    /// without a server message.
    pub fn user_message(&self) -> Option<&str> {
        match self.kind {
            FailureKind::Rejected { .. } => self.server_message.as_deref(),
            FailureKind::Io => Some(&self.message),
            FailureKind::InvalidUrl
            | FailureKind::Timeout
            | FailureKind::Network
            | FailureKind::Decode => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The server answered and reported failure (non-2xx or `success: false`).
    Rejected { status: u16 },
    Timeout,
    Network,
    /// Reading a local file for the upload failed.
    Io,
    /// A 2xx reply whose body was not the expected JSON.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Rejected { status } => write!(f, "rejected with status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Decode => write!(f, "malformed reply"),
        }
    }
}
