use crate::{CandidateId, NotificationId, NotificationKind, TransferPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub files: Vec<FileRowView>,
    pub selection_count: usize,
    pub submit_enabled: bool,
    pub transfer_phase: TransferPhase,
    /// `None` hides the progress section.
    pub progress: Option<ProgressView>,
    pub download_visible: bool,
    pub download_enabled: bool,
    pub cleanup_enabled: bool,
    pub notification: Option<NotificationView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub id: CandidateId,
    pub name: String,
    pub byte_size: u64,
}

impl FileRowView {
    /// Size in megabytes with two decimals, e.g. `1.50 MB`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.byte_size as f64 / 1024.0 / 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub percent: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub text: String,
    pub kind: NotificationKind,
}
