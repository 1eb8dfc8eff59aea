use podcast_core::{update, ClientState, Msg};

#[test]
fn unchanged_input_does_not_mark_dirty() {
    let (mut state, _) = update(
        ClientState::new(),
        Msg::InputChanged("https://example.com/ep.mp3".to_string()),
    );
    assert!(state.consume_dirty());

    let (mut next, effects) = update(
        state.clone(),
        Msg::InputChanged("https://example.com/ep.mp3".to_string()),
    );

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next.url_input(), state.url_input());
}

#[test]
fn shutdown_while_idle_is_noop() {
    let state = ClientState::new();
    let (next, effects) = update(state.clone(), Msg::Shutdown);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
