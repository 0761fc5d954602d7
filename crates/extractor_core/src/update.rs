use crate::{
    Admission, AppState, Effect, Msg, NotificationKind, SelectedFile, SelectionSource,
    ServiceFailure, TransferOutcome, UploadFile, ACCEPTED_MIME_TYPE, ARTIFACT_FILENAME,
};

const SUBMIT_SUCCEEDED: &str = "Files processed successfully!";
const SUBMIT_FAILED: &str = "Processing failed";
const DOWNLOAD_SUCCEEDED: &str = "File downloaded successfully!";
const DOWNLOAD_FAILED: &str = "Download failed";
const CLEANUP_SUCCEEDED: &str = "Server storage cleaned up";
const CLEANUP_FAILED: &str = "Cleanup failed";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected { source, files } => select_files(&mut state, source, files),
        Msg::FileUnreadable { name, reason } => {
            vec![state.notify(format!("Skipped {name}: {reason}"), NotificationKind::Error)]
        }
        Msg::RemoveClicked { id } => {
            if state.selection.remove(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RemoveNamed { name } => {
            if state.selection.remove_named(&name) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.selection.is_empty() || !state.transfer.is_idle() {
                return (state, Vec::new());
            }
            let request = state.next_request_id();
            state.transfer.begin(request);
            state.mark_dirty();
            let files = state
                .selection
                .iter()
                .map(|candidate| UploadFile {
                    name: candidate.name.clone(),
                    path: candidate.path.clone(),
                })
                .collect();
            vec![Effect::SubmitBatch { request, files }]
        }
        Msg::SubmitUploading { request } => {
            if state.transfer.mark_submitting(request) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitFinished { request, result } => match result {
            Ok(()) => {
                if !state.transfer.settle(request, TransferOutcome::Succeeded) {
                    return (state, Vec::new());
                }
                state.selection.clear();
                state.download.make_available();
                vec![state.notify(SUBMIT_SUCCEEDED, NotificationKind::Success)]
            }
            Err(failure) => {
                if !state.transfer.settle(request, TransferOutcome::Failed) {
                    return (state, Vec::new());
                }
                vec![state.notify(failure_text(failure, SUBMIT_FAILED), NotificationKind::Error)]
            }
        },
        Msg::DownloadClicked => {
            if !state.download.is_enabled() {
                return (state, Vec::new());
            }
            let request = state.next_request_id();
            state.download.begin(request);
            state.mark_dirty();
            vec![Effect::FetchArtifact { request }]
        }
        Msg::DownloadFinished { request, result } => {
            if !state.download.finish(request) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match result {
                Ok(bytes) => vec![Effect::SaveArtifact {
                    filename: ARTIFACT_FILENAME.to_string(),
                    bytes,
                }],
                Err(failure) => vec![state.notify(
                    failure_text(failure, DOWNLOAD_FAILED),
                    NotificationKind::Error,
                )],
            }
        }
        Msg::ArtifactSaved => vec![state.notify(DOWNLOAD_SUCCEEDED, NotificationKind::Success)],
        Msg::ArtifactSaveFailed { reason } => vec![state.notify(
            format!("Could not save {ARTIFACT_FILENAME}: {reason}"),
            NotificationKind::Error,
        )],
        Msg::CleanupClicked => {
            if state.cleanup.is_busy() {
                return (state, Vec::new());
            }
            let request = state.next_request_id();
            state.cleanup.begin(request);
            state.mark_dirty();
            vec![Effect::RequestCleanup { request }]
        }
        Msg::CleanupFinished { request, result } => {
            if !state.cleanup.finish(request) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match result {
                Ok(()) => vec![state.notify(CLEANUP_SUCCEEDED, NotificationKind::Success)],
                Err(failure) => vec![state.notify(
                    failure_text(failure, CLEANUP_FAILED),
                    NotificationKind::Error,
                )],
            }
        }
        Msg::NotificationExpired { id } => {
            if state.notifications.expire(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn select_files(
    state: &mut AppState,
    source: SelectionSource,
    files: Vec<SelectedFile>,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for file in files {
        if source == SelectionSource::Drop && file.mime_type != ACCEPTED_MIME_TYPE {
            continue;
        }
        match state.selection.add(file) {
            Admission::Accepted(_) => state.mark_dirty(),
            Admission::AlreadySelected => {}
            Admission::Rejected { name, reason } => {
                effects.push(state.notify(
                    format!("Skipped {name}: {reason}"),
                    NotificationKind::Error,
                ));
            }
        }
    }
    effects
}

fn failure_text(failure: ServiceFailure, fallback: &str) -> String {
    failure
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
