#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;

const NEW_SESSION: &str = "new";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chatbot: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Session {
    /// Name given to sessions created implicitly by the first message.
    pub fn default_name() -> String {
        return format!("Chat {}", Local::now().format("%Y-%m-%d %H:%M"));
    }
}

/// Which session the message thread is showing. `New` is a placeholder that
/// is only turned into a real session when the first message is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionSelection {
    None,
    New,
    Existing(String),
}

impl SessionSelection {
    pub fn parse(text: &str) -> SessionSelection {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SessionSelection::None;
        }
        if trimmed == NEW_SESSION {
            return SessionSelection::New;
        }

        return SessionSelection::Existing(trimmed.to_string());
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            SessionSelection::Existing(id) => return Some(id),
            _ => return None,
        }
    }

    pub fn is_new(&self) -> bool {
        return *self == SessionSelection::New;
    }
}
