use uuid::Uuid;

use super::FileRecord;
use super::SendRequest;

/// Message content captured when the user hits send, held until a session id
/// is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub files: Vec<FileRecord>,
}

#[derive(Debug)]
pub enum Action {
    FetchBots(),
    FetchSessions {
        generation: u64,
        chatbot: String,
        user_id: Option<String>,
    },
    FetchHistory {
        generation: u64,
        session_id: String,
    },
    CreateSession {
        generation: u64,
        chatbot: String,
        user_id: Option<String>,
        name: String,
        outgoing: OutgoingMessage,
    },
    SendMessage {
        generation: u64,
        local_id: Uuid,
        request: SendRequest,
    },
    Login {
        generation: u64,
        credential: String,
    },
    Logout(),
}

impl Action {
    /// Login and logout change the credential every later request uses, so
    /// the worker runs them in queue order instead of concurrently.
    pub fn runs_in_order(&self) -> bool {
        return matches!(self, Action::Login { .. } | Action::Logout());
    }
}
