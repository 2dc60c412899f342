#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::Author;
use crate::domain::models::ChatService;
use crate::domain::models::Credentials;
use crate::domain::models::FileRecord;
use crate::domain::models::LoginResponse;
use crate::domain::models::Message;
use crate::domain::models::SendRequest;
use crate::domain::models::Session;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionsQuery {
    chatbot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    session_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    chatbot: String,
    user_id: Option<String>,
    name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginRequest {
    token: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecord {
    sender: String,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
    #[serde(default)]
    files: Vec<FileRecord>,
}

impl MessageRecord {
    fn into_message(self) -> Message {
        let mut msg = Message::new(Author::from_sender(&self.sender), &self.text)
            .with_files(self.files);
        if let Some(timestamp) = self.timestamp {
            msg = msg.with_timestamp(timestamp);
        }
        if let Some(session_id) = self.session_id {
            msg = msg.with_session(&session_id);
        }

        return msg;
    }
}

/// Client for the chat service's REST API. Every request carries the bearer
/// token held by `credentials` at the time it is sent.
pub struct HttpChatService {
    url: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl HttpChatService {
    pub fn new(url: &str, credentials: Credentials) -> HttpChatService {
        return HttpChatService {
            url: url.trim_end_matches('/').to_string(),
            credentials,
            client: reqwest::Client::new(),
        };
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{url}{path}", url = self.url));
        if let Some(token) = self.credentials.get() {
            req = req.bearer_auth(token);
        }

        return req;
    }

    async fn check(res: Response, operation: &str) -> Result<Response> {
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status,
                body = body.as_str(),
                operation,
                "Chat service request failed"
            );
            bail!("Failed to {operation}: status {status}");
        }

        return Ok(res);
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    #[allow(clippy::implicit_return)]
    async fn list_bots(&self) -> Result<Vec<String>> {
        let res = self
            .request(Method::GET, "/chat/availableBots")
            .send()
            .await?;

        let bots = HttpChatService::check(res, "list chatbots")
            .await?
            .json::<Vec<String>>()
            .await?;

        return Ok(bots);
    }

    #[allow(clippy::implicit_return)]
    async fn list_sessions(&self, chatbot: &str, user_id: Option<&str>) -> Result<Vec<Session>> {
        let query = SessionsQuery {
            chatbot: chatbot.to_string(),
            user_id: user_id.map(|id| return id.to_string()),
        };

        let res = self
            .request(Method::GET, "/chat/sessions")
            .query(&query)
            .send()
            .await?;

        let sessions = HttpChatService::check(res, "list sessions")
            .await?
            .json::<Vec<Session>>()
            .await?;

        return Ok(sessions);
    }

    #[allow(clippy::implicit_return)]
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>> {
        let query = HistoryQuery {
            session_id: session_id.to_string(),
        };

        let res = self
            .request(Method::GET, "/chat/history")
            .query(&query)
            .send()
            .await?;

        let records = HttpChatService::check(res, "fetch history")
            .await?
            .json::<Vec<MessageRecord>>()
            .await?;

        let messages = records
            .into_iter()
            .map(|record| {
                return record.into_message();
            })
            .collect();

        return Ok(messages);
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, request: SendRequest) -> Result<Message> {
        tracing::debug!(
            session_id = request.session_id.as_str(),
            files = request.files.len(),
            "Sending message"
        );

        let res = self
            .request(Method::POST, "/chat/send")
            .json(&request)
            .send()
            .await?;

        let record = HttpChatService::check(res, "send message")
            .await?
            .json::<MessageRecord>()
            .await?;

        return Ok(record.into_message());
    }

    #[allow(clippy::implicit_return)]
    async fn login(&self, credential: &str) -> Result<LoginResponse> {
        let req = LoginRequest {
            token: credential.to_string(),
        };

        let res = self
            .request(Method::POST, "/user/google-login")
            .json(&req)
            .send()
            .await?;

        let login = HttpChatService::check(res, "log in")
            .await?
            .json::<LoginResponse>()
            .await?;

        return Ok(login);
    }

    #[allow(clippy::implicit_return)]
    async fn create_session(
        &self,
        chatbot: &str,
        user_id: Option<&str>,
        name: &str,
    ) -> Result<Session> {
        let req = CreateSessionRequest {
            chatbot: chatbot.to_string(),
            user_id: user_id.map(|id| return id.to_string()),
            name: name.to_string(),
        };

        let res = self
            .request(Method::POST, "/chat/sessions")
            .json(&req)
            .send()
            .await?;

        let session = HttpChatService::check(res, "create session")
            .await?
            .json::<Session>()
            .await?;

        return Ok(session);
    }
}
