use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::FileRecord;
use super::LoginResponse;
use super::Message;
use super::Session;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub session_id: String,
    pub user_id: Option<String>,
    pub text: String,
    pub files: Vec<FileRecord>,
}

#[async_trait]
pub trait ChatService {
    /// Names of the chatbots a user can talk to.
    async fn list_bots(&self) -> Result<Vec<String>>;

    /// Sessions the user holds with a chatbot. Anonymous callers pass `None`
    /// and leave it to the service to accept or reject the request.
    async fn list_sessions(&self, chatbot: &str, user_id: Option<&str>) -> Result<Vec<Session>>;

    /// Full message history of a session, oldest first.
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Delivers a user message and returns the chatbot's reply.
    async fn send_message(&self, request: SendRequest) -> Result<Message>;

    /// Exchanges a Google identity credential for a bearer token and user.
    async fn login(&self, credential: &str) -> Result<LoginResponse>;

    async fn create_session(
        &self,
        chatbot: &str,
        user_id: Option<&str>,
        name: &str,
    ) -> Result<Session>;
}

pub type ChatServiceBox = Arc<dyn ChatService + Send + Sync>;
