use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;
use mockito::Matcher;
use serde_json::json;
use test_utils::history_fixture;

use super::HttpChatService;
use super::MessageRecord;
use crate::domain::models::Author;
use crate::domain::models::ChatService;
use crate::domain::models::Credentials;
use crate::domain::models::FileRecord;
use crate::domain::models::SendRequest;
use crate::domain::models::Session;
use crate::domain::models::User;

fn session_json(id: &str) -> serde_json::Value {
    return json!({
        "id": id,
        "name": "Trip ideas",
        "chatbot": "Atlas",
        "userId": "u-1"
    });
}

#[tokio::test]
async fn it_lists_bots_with_a_bearer_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/availableBots")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_body(json!(["Atlas", "Sage"]).to_string())
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::with_token("abc123"));
    let bots = service.list_bots().await?;

    assert_eq!(bots, vec!["Atlas".to_string(), "Sage".to_string()]);
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_calls_anonymously_without_a_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/availableBots")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let bots = service.list_bots().await?;

    assert!(bots.is_empty());
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_reads_the_token_when_each_request_is_sent() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/availableBots")
        .match_header("authorization", "Bearer later")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let credentials = Credentials::default();
    let service = HttpChatService::new(&server.url(), credentials.clone());
    credentials.set("later");
    service.list_bots().await?;

    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_error_statuses() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/availableBots")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let res = service.list_bots().await;

    assert!(res.is_err());
    insta::assert_snapshot!(res.unwrap_err().to_string(), @"Failed to list chatbots: status 500");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_lists_sessions_for_a_chatbot_and_user() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/sessions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chatbot".to_string(), "Travel Agent".to_string()),
            Matcher::UrlEncoded("userId".to_string(), "u-1".to_string()),
        ]))
        .with_status(200)
        .with_body(json!([session_json("s-1"), session_json("s-2")]).to_string())
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let sessions = service.list_sessions("Travel Agent", Some("u-1")).await?;

    assert_eq!(sessions.len(), 2);
    assert_eq!(
        sessions[0],
        Session {
            id: "s-1".to_string(),
            name: "Trip ideas".to_string(),
            chatbot: "Atlas".to_string(),
            user_id: Some("u-1".to_string()),
        }
    );
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_leaves_out_the_user_for_anonymous_session_lists() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/sessions")
        .match_query(Matcher::Exact("chatbot=Atlas".to_string()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let sessions = service.list_sessions("Atlas", None).await?;

    assert!(sessions.is_empty());
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_fetches_history() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chat/history")
        .match_query(Matcher::UrlEncoded(
            "sessionId".to_string(),
            "s-1".to_string(),
        ))
        .with_status(200)
        .with_body(history_fixture())
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let messages = service.fetch_history("s-1").await?;

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].author, Author::User);
    assert_eq!(messages[0].text, "What's the weather like on Mars?");
    assert_eq!(messages[0].session_id, Some("s-1".to_string()));
    assert_eq!(
        messages[0].timestamp,
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    );
    assert_eq!(messages[1].author, Author::Bot("Atlas".to_string()));
    assert!(!messages[1].is_pending());
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_sends_messages_with_files() -> Result<()> {
    let reply = serde_json::to_string(&MessageRecord {
        sender: "Atlas".to_string(),
        text: "Got your notes!".to_string(),
        timestamp: None,
        session_id: Some("s-1".to_string()),
        files: vec![],
    })?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/send")
        .match_header("authorization", "Bearer abc123")
        .match_body(Matcher::Json(json!({
            "sessionId": "s-1",
            "userId": "u-1",
            "text": "Here are my notes",
            "files": [
                {"name": "notes.txt", "type": "text/plain", "size": 5, "content": "hello"}
            ]
        })))
        .with_status(200)
        .with_body(reply)
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::with_token("abc123"));
    let message = service
        .send_message(SendRequest {
            session_id: "s-1".to_string(),
            user_id: Some("u-1".to_string()),
            text: "Here are my notes".to_string(),
            files: vec![FileRecord {
                name: "notes.txt".to_string(),
                mime_type: "text/plain".to_string(),
                size: 5,
                content: "hello".to_string(),
            }],
        })
        .await?;

    assert_eq!(message.author, Author::Bot("Atlas".to_string()));
    assert_eq!(message.text, "Got your notes!");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_logs_in_with_a_google_credential() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/user/google-login")
        .match_body(Matcher::Json(json!({"token": "google-jwt"})))
        .with_status(200)
        .with_body(
            json!({
                "token": "abc123",
                "user": {
                    "id": "u-1",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "picture": "https://example.com/ada.png"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let login = service.login("google-jwt").await?;

    assert_eq!(login.token, "abc123");
    assert_eq!(
        login.user,
        User {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: Some("https://example.com/ada.png".to_string()),
        }
    );
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_log_in_when_rejected() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/user/google-login")
        .with_status(401)
        .create_async()
        .await;

    let service = HttpChatService::new(&server.url(), Credentials::default());
    let res = service.login("expired").await;

    assert!(res.is_err());
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_creates_sessions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/sessions")
        .match_body(Matcher::Json(json!({
            "chatbot": "Atlas",
            "userId": "u-1",
            "name": "Chat 2026-10-19 09:00"
        })))
        .with_status(200)
        .with_body(session_json("s-9").to_string())
        .create_async()
        .await;

    let service = HttpChatService::new(&format!("{}/", server.url()), Credentials::default());
    let session = service
        .create_session("Atlas", Some("u-1"), "Chat 2026-10-19 09:00")
        .await?;

    assert_eq!(session.id, "s-9");
    mock.assert_async().await;

    return Ok(());
}
