use crate::{CandidateId, NotificationId, RequestId, SelectedFile};

/// Where a batch of selected files came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// File picker: every file is validated and rejections are reported.
    Picker,
    /// Drag and drop: anything that is not a PDF is discarded silently.
    Drop,
}

/// Failed remote call, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceFailure {
    /// Text to show the user. `None` falls back to a generic message.
    pub message: Option<String>,
}

impl ServiceFailure {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User selected files.
    FilesSelected {
        source: SelectionSource,
        files: Vec<SelectedFile>,
    },
    /// A selected path could not be inspected.
    FileUnreadable { name: String, reason: String },
    /// User removed a selected file by id.
    RemoveClicked { id: CandidateId },
    /// User removed a selected file by name.
    RemoveNamed { name: String },
    /// User clicked Process.
    SubmitClicked,
    /// Engine finished packaging the batch and issued the upload.
    SubmitUploading { request: RequestId },
    /// Engine completion for the submission.
    SubmitFinished {
        request: RequestId,
        result: Result<(), ServiceFailure>,
    },
    /// User clicked Download.
    DownloadClicked,
    /// Engine completion for the artifact download.
    DownloadFinished {
        request: RequestId,
        result: Result<Vec<u8>, ServiceFailure>,
    },
    /// The downloaded artifact was written to disk.
    ArtifactSaved,
    /// Writing the downloaded artifact to disk failed.
    ArtifactSaveFailed { reason: String },
    /// User asked the server to prune old sessions.
    CleanupClicked,
    /// Engine completion for the cleanup request.
    CleanupFinished {
        request: RequestId,
        result: Result<(), ServiceFailure>,
    },
    /// Expiry timer fired for a notification.
    NotificationExpired { id: NotificationId },
}
