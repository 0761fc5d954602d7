use std::path::PathBuf;
use std::time::Duration;

use crate::{NotificationId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Package every file and upload them as one batch.
    SubmitBatch {
        request: RequestId,
        files: Vec<UploadFile>,
    },
    /// Retrieve the produced artifact.
    FetchArtifact { request: RequestId },
    /// Hand the artifact bytes to the user under `filename`.
    SaveArtifact { filename: String, bytes: Vec<u8> },
    /// Ask the server to prune old sessions and outputs.
    RequestCleanup { request: RequestId },
    /// Replace any pending notification timer with one for `id`.
    ScheduleNotificationExpiry { id: NotificationId, after: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub path: PathBuf,
}
