use extractor_core::{update, AppState, Msg};

#[test]
fn removing_from_empty_selection_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::RemoveClicked { id: 7 });

    assert_eq!(state, next);
    assert!(!next.consume_dirty());
    assert!(effects.is_empty());
}

#[test]
fn clicks_on_a_fresh_state_change_nothing() {
    for msg in [
        Msg::SubmitClicked,
        Msg::DownloadClicked,
        Msg::RemoveClicked { id: 1 },
        Msg::RemoveNamed {
            name: "a.pdf".to_string(),
        },
        Msg::NotificationExpired { id: 1 },
        Msg::SubmitUploading { request: 1 },
    ] {
        let state = AppState::new();
        let (next, effects) = update(state.clone(), msg.clone());
        assert_eq!(state, next, "{msg:?} changed state");
        assert!(effects.is_empty(), "{msg:?} produced effects");
    }
}
