use anyhow::Result;
use uuid::Uuid;

use super::Message;
use super::OutgoingMessage;
use super::Session;
use super::User;

/// Results reported back by the actions worker. Each carries the generation
/// its request was issued under so stale results can be discarded.
#[derive(Debug)]
pub enum Event {
    BotsLoaded(Result<Vec<String>>),
    SessionsLoaded {
        generation: u64,
        result: Result<Vec<Session>>,
    },
    HistoryLoaded {
        generation: u64,
        result: Result<Vec<Message>>,
    },
    SessionCreated {
        generation: u64,
        outgoing: OutgoingMessage,
        result: Result<Session>,
    },
    MessageSent {
        generation: u64,
        local_id: Uuid,
        result: Result<Message>,
    },
    LoggedIn {
        generation: u64,
        result: Result<User>,
    },
}
