use super::Session;
use super::SessionSelection;

#[test]
fn it_parses_the_new_sentinel() {
    assert_eq!(SessionSelection::parse("new"), SessionSelection::New);
    assert_eq!(SessionSelection::parse(" new "), SessionSelection::New);
    assert!(SessionSelection::parse("new").is_new());
}

#[test]
fn it_parses_existing_ids() {
    let selection = SessionSelection::parse("s-42");
    assert_eq!(selection, SessionSelection::Existing("s-42".to_string()));
    assert_eq!(selection.session_id(), Some("s-42"));
}

#[test]
fn it_never_exposes_the_sentinel_as_an_id() {
    assert_eq!(SessionSelection::New.session_id(), None);
    assert_eq!(SessionSelection::None.session_id(), None);
    assert_eq!(SessionSelection::parse(""), SessionSelection::None);
}

#[test]
fn it_names_new_sessions_after_the_current_time() {
    let name = Session::default_name();
    assert!(name.starts_with("Chat "));
    assert_eq!(name.len(), "Chat 2026-10-19 09:00".len());
}

#[test]
fn it_deserializes_camel_case_sessions() {
    let session: Session = serde_json::from_str(
        r#"{"id": "s-1", "name": "Trip ideas", "chatbot": "Atlas", "userId": "u-1"}"#,
    )
    .unwrap();

    assert_eq!(session.id, "s-1");
    assert_eq!(session.name, "Trip ideas");
    assert_eq!(session.chatbot, "Atlas");
    assert_eq!(session.user_id, Some("u-1".to_string()));
}
