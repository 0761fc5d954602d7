use crate::view_model::{AppViewModel, FileRowView, NotificationView, ProgressView};
use crate::{
    CleanupController, DownloadController, Effect, NotificationCenter, NotificationKind,
    RequestId, SelectionStore, TransferController, TransferOutcome, TransferPhase,
    NOTIFICATION_TTL,
};

const PREPARING_TEXT: &str = "Preparing files...";
const COMPLETE_TEXT: &str = "Complete!";

/// Everything the client knows, owned by a single dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) selection: SelectionStore,
    pub(crate) transfer: TransferController,
    pub(crate) download: DownloadController,
    pub(crate) cleanup: CleanupController,
    pub(crate) notifications: NotificationCenter,
    next_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn transfer(&self) -> &TransferController {
        &self.transfer
    }

    pub fn download(&self) -> &DownloadController {
        &self.download
    }

    pub fn cleanup(&self) -> &CleanupController {
        &self.cleanup
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn view(&self) -> AppViewModel {
        let files = self
            .selection
            .iter()
            .map(|candidate| FileRowView {
                id: candidate.id,
                name: candidate.name.clone(),
                byte_size: candidate.byte_size,
            })
            .collect();

        let progress = match (self.transfer.phase(), self.transfer.last_outcome()) {
            (TransferPhase::Preparing | TransferPhase::Submitting, _) => Some(ProgressView {
                percent: 0,
                text: PREPARING_TEXT.to_string(),
            }),
            (TransferPhase::Idle, Some(TransferOutcome::Succeeded)) => Some(ProgressView {
                percent: 100,
                text: COMPLETE_TEXT.to_string(),
            }),
            (TransferPhase::Idle, _) => None,
        };

        AppViewModel {
            files,
            selection_count: self.selection.len(),
            submit_enabled: !self.selection.is_empty() && self.transfer.is_idle(),
            transfer_phase: self.transfer.phase(),
            progress,
            download_visible: self.download.is_available(),
            download_enabled: self.download.is_enabled(),
            cleanup_enabled: !self.cleanup.is_busy(),
            notification: self.notifications.current().map(|n| NotificationView {
                id: n.id,
                text: n.text.clone(),
                kind: n.kind,
            }),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    /// Shows a notification and returns the effect that arms its expiry.
    pub(crate) fn notify(&mut self, text: impl Into<String>, kind: NotificationKind) -> Effect {
        let id = self.notifications.show(text, kind);
        self.mark_dirty();
        Effect::ScheduleNotificationExpiry {
            id,
            after: NOTIFICATION_TTL,
        }
    }
}
