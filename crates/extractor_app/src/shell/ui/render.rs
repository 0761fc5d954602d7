use extractor_core::{AppViewModel, NotificationKind, TransferPhase, ARTIFACT_FILENAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Out(String),
    Err(String),
}

/// Lines describing what changed between two views. `stamp` prefixes
/// notifications.
pub fn render(prev: &AppViewModel, next: &AppViewModel, stamp: &str) -> Vec<OutputLine> {
    let mut lines = Vec::new();

    if prev.files != next.files {
        lines.push(OutputLine::Out(selection_summary(next)));
    }

    if prev.progress != next.progress {
        if let Some(progress) = &next.progress {
            lines.push(OutputLine::Out(format!(
                "[{:>3}%] {}",
                progress.percent, progress.text
            )));
        }
    }

    if next.download_visible && !prev.download_visible {
        lines.push(OutputLine::Out(format!(
            "{} is ready. Type `download` to save it.",
            ARTIFACT_FILENAME
        )));
    }

    let new_notification = match (&prev.notification, &next.notification) {
        (_, None) => None,
        (Some(old), Some(new)) if old.id == new.id => None,
        (_, Some(new)) => Some(new),
    };
    if let Some(note) = new_notification {
        lines.push(match note.kind {
            NotificationKind::Success => OutputLine::Out(format!("{} OK  {}", stamp, note.text)),
            NotificationKind::Error => OutputLine::Err(format!("{} ERR {}", stamp, note.text)),
        });
    }

    lines
}

pub fn render_list(view: &AppViewModel) -> Vec<OutputLine> {
    if view.files.is_empty() {
        return vec![OutputLine::Out("No files selected.".to_string())];
    }
    let mut lines = vec![OutputLine::Out(selection_summary(view))];
    lines.extend(view.files.iter().map(|row| {
        OutputLine::Out(format!("  #{:<3} {}  ({})", row.id, row.name, row.size_label()))
    }));
    lines
}

pub fn render_status(view: &AppViewModel) -> OutputLine {
    let phase = match view.transfer_phase {
        TransferPhase::Idle => "Idle",
        TransferPhase::Preparing => "Preparing",
        TransferPhase::Submitting => "Submitting",
    };
    let download = match (view.download_visible, view.download_enabled) {
        (false, _) => "not available",
        (true, true) => "available",
        (true, false) => "in progress",
    };
    let mut text = format!(
        "Transfer: {} | Selected: {} | Download: {}",
        phase, view.selection_count, download
    );
    if !view.cleanup_enabled {
        text.push_str(" | Cleanup: in progress");
    }
    OutputLine::Out(text)
}

fn selection_summary(view: &AppViewModel) -> String {
    let total: u64 = view.files.iter().map(|row| row.byte_size).sum();
    format!(
        "Selected {} file(s), {:.2} MB",
        view.selection_count,
        total as f64 / 1024.0 / 1024.0
    )
}
