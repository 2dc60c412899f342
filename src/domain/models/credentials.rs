#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::RwLock;

/// Bearer token shared between the state core and the remote client. Cloning
/// shares the same slot.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<String>>>,
}

impl Credentials {
    pub fn with_token(token: &str) -> Credentials {
        let credentials = Credentials::default();
        credentials.set(token);
        return credentials;
    }

    pub fn get(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => return guard.clone(),
            Err(poisoned) => return poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, token: &str) {
        let value = if token.trim().is_empty() {
            None
        } else {
            Some(token.trim().to_string())
        };

        match self.token.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    pub fn clear(&self) {
        self.set("");
    }
}
