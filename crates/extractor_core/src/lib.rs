//! Extractor core: pure state machine and view-model helpers.
mod download;
mod effect;
mod msg;
mod notification;
mod selection;
mod state;
mod transfer;
mod update;
mod view_model;

pub use download::{CleanupController, DownloadController, ARTIFACT_FILENAME};
pub use effect::{Effect, UploadFile};
pub use msg::{Msg, SelectionSource, ServiceFailure};
pub use notification::{
    Notification, NotificationCenter, NotificationId, NotificationKind, NOTIFICATION_TTL,
};
pub use selection::{
    validate, Admission, CandidateId, FileCandidate, Rejection, SelectedFile, SelectionStore,
    ACCEPTED_MIME_TYPE, MAX_FILE_BYTES,
};
pub use state::AppState;
pub use transfer::{RequestId, TransferController, TransferOutcome, TransferPhase};
pub use update::update;
pub use view_model::{AppViewModel, FileRowView, NotificationView, ProgressView};
