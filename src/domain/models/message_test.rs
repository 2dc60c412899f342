use super::Author;
use super::Delivery;
use super::Message;
use super::MessageType;
use super::SEND_FAILURE_TEXT;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Parley, "Hi there!");
    assert_eq!(msg.author, Author::Parley);
    assert_eq!(msg.author.to_string(), "Parley");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert_eq!(msg.delivery(), &Delivery::Delivered);
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Bot("Atlas".to_string()), "\t\tHi there!");
    assert_eq!(msg.author.to_string(), "Atlas");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Author::Parley, MessageType::Error, "It broke!");
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_gives_each_message_its_own_local_id() {
    let first = Message::new(Author::User, "one");
    let second = Message::new(Author::User, "one");
    assert_ne!(first.local_id, second.local_id);
}

#[test]
fn it_builds_pending_outgoing_messages() {
    let msg = Message::outgoing("Hello", vec![]).with_session("s-1");
    assert_eq!(msg.author, Author::User);
    assert_eq!(msg.author.to_string(), "You");
    assert_eq!(msg.session_id, Some("s-1".to_string()));
    assert!(msg.is_pending());
}

#[test]
fn it_marks_delivered_once() {
    let mut msg = Message::outgoing("Hello", vec![]);
    msg.mark_delivered();
    msg.mark_failed("too late");
    assert_eq!(msg.delivery(), &Delivery::Delivered);
}

#[test]
fn it_marks_failed_with_reason() {
    let mut msg = Message::outgoing("Hello", vec![]);
    msg.mark_failed("connection refused");
    assert_eq!(
        msg.delivery(),
        &Delivery::Failed("connection refused".to_string())
    );
    assert!(!msg.is_pending());
}

#[test]
fn it_attributes_send_failures_to_the_chatbot() {
    let msg = Message::send_failure("Atlas");
    assert_eq!(msg.author, Author::Bot("Atlas".to_string()));
    assert_eq!(msg.message_type(), MessageType::Error);
    insta::assert_snapshot!(msg.text, @"Sorry, I couldn't process your message. Please try again.");
    assert_eq!(msg.text, SEND_FAILURE_TEXT);
}

#[test]
fn it_maps_senders_to_authors() {
    assert_eq!(Author::from_sender("You"), Author::User);
    assert_eq!(Author::from_sender("user"), Author::User);
    assert_eq!(
        Author::from_sender(" Atlas "),
        Author::Bot("Atlas".to_string())
    );
}
