#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::Author;
use super::FileRecord;

/// Shown in place of a bot reply when a send request fails.
pub const SEND_FAILURE_TEXT: &str = "Sorry, I couldn't process your message. Please try again.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

/// Delivery state of a message composed locally. Messages received from the
/// service are always `Delivered`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    Delivered,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct Message {
    pub local_id: Uuid,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: Option<String>,
    pub files: Vec<FileRecord>,
    mtype: MessageType,
    delivery: Delivery,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            local_id: Uuid::new_v4(),
            author,
            text: text.replace('\t', "  "),
            timestamp: Utc::now(),
            session_id: None,
            files: vec![],
            mtype: MessageType::Normal,
            delivery: Delivery::Delivered,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        let mut msg = Message::new(author, text);
        msg.mtype = mtype;
        return msg;
    }

    /// A message typed by the user that has not reached the service yet.
    pub fn outgoing(text: &str, files: Vec<FileRecord>) -> Message {
        let mut msg = Message::new(Author::User, text);
        msg.files = files;
        msg.delivery = Delivery::Pending;
        return msg;
    }

    /// The in-thread stand-in for a reply that never arrived.
    pub fn send_failure(chatbot: &str) -> Message {
        return Message::new_with_type(
            Author::Bot(chatbot.to_string()),
            MessageType::Error,
            SEND_FAILURE_TEXT,
        );
    }

    pub fn with_session(mut self, session_id: &str) -> Message {
        self.session_id = Some(session_id.to_string());
        return self;
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Message {
        self.timestamp = timestamp;
        return self;
    }

    pub fn with_files(mut self, files: Vec<FileRecord>) -> Message {
        self.files = files;
        return self;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn delivery(&self) -> &Delivery {
        return &self.delivery;
    }

    pub fn is_pending(&self) -> bool {
        return self.delivery == Delivery::Pending;
    }

    pub fn mark_delivered(&mut self) {
        if self.is_pending() {
            self.delivery = Delivery::Delivered;
        }
    }

    pub fn mark_failed(&mut self, reason: &str) {
        if self.is_pending() {
            self.delivery = Delivery::Failed(reason.to_string());
        }
    }
}
