use std::path::PathBuf;

use extractor_core::{
    update, AppState, Effect, Msg, NotificationKind, SelectedFile, SelectionSource,
    NOTIFICATION_TTL,
};

fn expiry_ids(effects: &[Effect]) -> Vec<u64> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ScheduleNotificationExpiry { id, after } => {
                assert_eq!(*after, NOTIFICATION_TTL);
                Some(*id)
            }
            _ => None,
        })
        .collect()
}

fn unreadable(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileUnreadable {
            name: name.to_string(),
            reason: "gone".to_string(),
        },
    )
}

#[test]
fn ttl_is_five_seconds() {
    assert_eq!(NOTIFICATION_TTL.as_millis(), 5000);
}

#[test]
fn latest_show_wins_and_old_expiry_is_ignored() {
    let (state, first) = unreadable(AppState::new(), "one.pdf");
    let (state, second) = unreadable(state, "two.pdf");
    let first_id = expiry_ids(&first)[0];
    let second_id = expiry_ids(&second)[0];
    assert_ne!(first_id, second_id);

    let (mut state, _) = update(state, Msg::NotificationExpired { id: first_id });
    let shown = state.view().notification.expect("still shown");
    assert_eq!(shown.id, second_id);
    assert_eq!(shown.text, "Skipped two.pdf: gone");
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::NotificationExpired { id: second_id });
    assert!(effects.is_empty());
    assert!(state.view().notification.is_none());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::NotificationExpired { id: second_id });
    assert!(!state.consume_dirty());
}

#[test]
fn every_rejection_in_a_batch_rearms_the_timer() {
    let files = ["a.txt", "b.txt", "c.txt"]
        .iter()
        .map(|name| SelectedFile {
            name: name.to_string(),
            byte_size: 1,
            mime_type: "text/plain".to_string(),
            path: PathBuf::from(name),
        })
        .collect();
    let (state, effects) = update(
        AppState::new(),
        Msg::FilesSelected {
            source: SelectionSource::Picker,
            files,
        },
    );

    let ids = expiry_ids(&effects);
    assert_eq!(ids.len(), 3);
    let shown = state.view().notification.expect("shown");
    assert_eq!(shown.id, *ids.last().unwrap());
    assert_eq!(shown.text, "Skipped c.txt: Not a PDF file");
    assert_eq!(shown.kind, NotificationKind::Error);
}
