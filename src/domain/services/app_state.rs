#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::Attachments;
use super::BatchOutcome;
use super::MAX_ATTACHMENTS;
use crate::domain::models::Action;
use crate::domain::models::AttachedFile;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::OutgoingMessage;
use crate::domain::models::RawFile;
use crate::domain::models::SendRequest;
use crate::domain::models::Session;
use crate::domain::models::SessionSelection;
use crate::domain::models::User;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Advisory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Client-side view of the conversation. Every remote call is requested
/// through `Action`s and its outcome comes back through `handle_event`, so
/// the state is only ever mutated by its owner.
///
/// Generation counters fence results: `chatbot_generation` changes whenever
/// the session list is refetched for a new chatbot or user,
/// `view_generation` whenever the message thread is swapped out and
/// `auth_generation` on logout. Results issued under an older generation are
/// dropped.
pub struct AppState {
    pub bots: Vec<String>,
    pub chatbot: Option<String>,
    pub selection: SessionSelection,
    pub sessions: Vec<Session>,
    pub messages: Vec<Message>,
    pub compose: String,
    pub attachments: Vec<AttachedFile>,
    pub user: Option<User>,
    pub login_open: bool,
    pub creating_session: bool,
    pub loading_sessions: bool,
    pub loading_history: bool,
    chatbot_generation: u64,
    view_generation: u64,
    auth_generation: u64,
    notices: Vec<Notice>,
    preferred_chatbot: Option<String>,
    preferred_session: Option<String>,
    tx: mpsc::UnboundedSender<Action>,
}

impl AppState {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> AppState {
        return AppState {
            bots: vec![],
            chatbot: None,
            selection: SessionSelection::None,
            sessions: vec![],
            messages: vec![],
            compose: "".to_string(),
            attachments: vec![],
            user: None,
            login_open: false,
            creating_session: false,
            loading_sessions: false,
            loading_history: false,
            chatbot_generation: 0,
            view_generation: 0,
            auth_generation: 0,
            notices: vec![],
            preferred_chatbot: None,
            preferred_session: None,
            tx,
        };
    }

    /// Requests the chatbot list. The preferred chatbot and session, when not
    /// empty, are opened once the lists they belong to arrive.
    pub fn init(&mut self, preferred_chatbot: &str, preferred_session: &str) -> Result<()> {
        if !preferred_chatbot.is_empty() {
            self.preferred_chatbot = Some(preferred_chatbot.to_string());
        }
        if !preferred_session.is_empty() {
            self.preferred_session = Some(preferred_session.to_string());
        }

        self.tx.send(Action::FetchBots())?;
        return Ok(());
    }

    pub fn view_generation(&self) -> u64 {
        return self.view_generation;
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        return self.notices.drain(..).collect();
    }

    fn notify(&mut self, kind: NoticeKind, text: &str) {
        self.notices.push(Notice {
            kind,
            text: text.to_string(),
        });
    }

    fn user_id(&self) -> Option<String> {
        return self.user.as_ref().map(|user| return user.id.to_string());
    }

    pub fn select_chatbot(&mut self, name: &str) -> Result<()> {
        if !self.bots.iter().any(|bot| return bot == name) {
            self.notify(
                NoticeKind::Advisory,
                &format!("There's no chatbot named {name}. Run /bots to see who's available."),
            );
            return Ok(());
        }

        self.chatbot_generation += 1;
        self.view_generation += 1;
        self.chatbot = Some(name.to_string());
        self.selection = SessionSelection::New;
        self.sessions.clear();
        self.messages.clear();
        self.creating_session = false;
        self.loading_history = false;
        self.loading_sessions = true;

        self.tx.send(Action::FetchSessions {
            generation: self.chatbot_generation,
            chatbot: name.to_string(),
            user_id: self.user_id(),
        })?;

        return Ok(());
    }

    pub fn select_session(&mut self, selection: SessionSelection) -> Result<()> {
        if self.chatbot.is_none() {
            self.notify(
                NoticeKind::Advisory,
                "Pick a chatbot first with /bot NAME.",
            );
            return Ok(());
        }

        match selection {
            SessionSelection::None => {
                return Ok(());
            }
            SessionSelection::New => {
                self.view_generation += 1;
                self.selection = SessionSelection::New;
                self.messages.clear();
                self.creating_session = false;
                self.loading_history = false;
            }
            SessionSelection::Existing(id) => {
                if !self.sessions.iter().any(|session| return session.id == id) {
                    self.notify(
                        NoticeKind::Advisory,
                        &format!("There's no session {id} for this chatbot. Run /sessions to list them."),
                    );
                    return Ok(());
                }

                self.view_generation += 1;
                self.selection = SessionSelection::Existing(id.to_string());
                self.messages.clear();
                self.creating_session = false;
                self.loading_history = true;

                self.tx.send(Action::FetchHistory {
                    generation: self.view_generation,
                    session_id: id,
                })?;
            }
        }

        return Ok(());
    }

    pub fn set_compose(&mut self, text: &str) {
        self.compose = text.to_string();
    }

    /// Sends the compose text and attachments. When the thread is a new
    /// session, the session is created first and the message only shows up
    /// once that succeeds.
    pub fn send_message(&mut self) -> Result<()> {
        let text = self.compose.trim().to_string();
        if text.is_empty() && self.attachments.is_empty() {
            return Ok(());
        }

        let chatbot = match &self.chatbot {
            Some(chatbot) => chatbot.to_string(),
            None => {
                self.notify(
                    NoticeKind::Advisory,
                    "Pick a chatbot first with /bot NAME.",
                );
                return Ok(());
            }
        };

        if self.creating_session {
            self.notify(
                NoticeKind::Advisory,
                "Still starting your new chat. Send again once it's ready.",
            );
            return Ok(());
        }

        let outgoing = OutgoingMessage {
            text,
            files: self
                .attachments
                .iter()
                .map(|file| return file.to_record())
                .collect(),
        };

        if self.selection.session_id().is_some() {
            return self.dispatch_send(outgoing);
        }

        self.selection = SessionSelection::New;
        self.creating_session = true;
        self.tx.send(Action::CreateSession {
            generation: self.view_generation,
            chatbot,
            user_id: self.user_id(),
            name: Session::default_name(),
            outgoing,
        })?;

        return Ok(());
    }

    fn dispatch_send(&mut self, outgoing: OutgoingMessage) -> Result<()> {
        let session_id = match self.selection.session_id() {
            Some(id) => id.to_string(),
            None => return Ok(()),
        };

        let message =
            Message::outgoing(&outgoing.text, outgoing.files.clone()).with_session(&session_id);
        let local_id = message.local_id;
        self.messages.push(message);
        self.compose.clear();
        self.release_attachments();

        self.tx.send(Action::SendMessage {
            generation: self.view_generation,
            local_id,
            request: SendRequest {
                session_id,
                user_id: self.user_id(),
                text: outgoing.text,
                files: outgoing.files,
            },
        })?;

        return Ok(());
    }

    /// Adds a batch of files to the compose box. Refused while a new session
    /// is being created, since the pending send already holds its files.
    pub fn attach_files(&mut self, batch: Vec<RawFile>) {
        if self.creating_session {
            self.notify(
                NoticeKind::Advisory,
                "Still starting your new chat. Attach files once it's ready.",
            );
            return;
        }

        match Attachments::process(batch, self.attachments.len()) {
            BatchOutcome::Accepted(files) => {
                self.attachments.extend(files);
            }
            BatchOutcome::Rejected { remaining } => {
                self.notify(
                    NoticeKind::Advisory,
                    &format!(
                        "You can attach up to {MAX_ATTACHMENTS} files. You can add {remaining} more."
                    ),
                );
            }
        }
    }

    /// Removes the attachment at `index`, releasing its preview. Returns
    /// whether anything was removed.
    pub fn remove_attachment(&mut self, index: usize) -> bool {
        if self.creating_session {
            self.notify(
                NoticeKind::Advisory,
                "Still starting your new chat. Detach files once it's ready.",
            );
            return false;
        }
        if index >= self.attachments.len() {
            return false;
        }

        self.attachments.remove(index).release();
        return true;
    }

    /// Clears the compose box, releasing every attachment preview.
    pub fn discard_compose(&mut self) {
        self.compose.clear();
        self.release_attachments();
    }

    fn release_attachments(&mut self) {
        for file in self.attachments.drain(..) {
            file.release();
        }
    }

    pub fn login(&mut self, credential: &str) -> Result<()> {
        self.login_open = true;
        if credential.trim().is_empty() {
            self.notify(
                NoticeKind::Advisory,
                "Paste your Google credential to sign in, or enter a blank line to cancel.",
            );
            return Ok(());
        }

        self.tx.send(Action::Login {
            generation: self.auth_generation,
            credential: credential.trim().to_string(),
        })?;
        return Ok(());
    }

    pub fn cancel_login(&mut self) {
        self.login_open = false;
    }

    pub fn logout(&mut self) -> Result<()> {
        self.chatbot_generation += 1;
        self.view_generation += 1;
        self.auth_generation += 1;
        self.user = None;
        self.login_open = false;
        self.selection = if self.chatbot.is_some() {
            SessionSelection::New
        } else {
            SessionSelection::None
        };
        self.sessions.clear();
        self.messages.clear();
        self.creating_session = false;
        self.loading_sessions = false;
        self.loading_history = false;

        self.tx.send(Action::Logout())?;
        return Ok(());
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::BotsLoaded(result) => {
                self.handle_bots_loaded(result)?;
            }
            Event::SessionsLoaded { generation, result } => {
                if generation != self.chatbot_generation {
                    tracing::debug!(generation, "Dropping stale session list");
                    return Ok(());
                }
                self.handle_sessions_loaded(result)?;
            }
            Event::HistoryLoaded { generation, result } => {
                if generation != self.view_generation {
                    tracing::debug!(generation, "Dropping stale history");
                    return Ok(());
                }
                self.loading_history = false;
                match result {
                    Ok(messages) => self.messages = messages,
                    Err(err) => {
                        tracing::error!(error = ?err, "Failed to fetch history");
                        self.messages.clear();
                    }
                }
            }
            Event::SessionCreated {
                generation,
                outgoing,
                result,
            } => {
                if generation != self.view_generation {
                    tracing::debug!(generation, "Dropping stale session creation");
                    return Ok(());
                }
                self.creating_session = false;
                match result {
                    Ok(session) => {
                        self.selection = SessionSelection::Existing(session.id.to_string());
                        if !self.sessions.iter().any(|e| return e.id == session.id) {
                            self.sessions.push(session);
                        }
                        self.dispatch_send(outgoing)?;
                    }
                    Err(err) => {
                        tracing::error!(error = ?err, "Failed to create session");
                        self.notify(
                            NoticeKind::Advisory,
                            "Couldn't start a new chat. Your message wasn't sent, please try again.",
                        );
                    }
                }
            }
            Event::MessageSent {
                generation,
                local_id,
                result,
            } => {
                if generation != self.view_generation {
                    tracing::debug!(generation, "Dropping reply for a previous thread");
                    return Ok(());
                }
                self.handle_message_sent(local_id, result);
            }
            Event::LoggedIn { generation, result } => {
                if generation != self.auth_generation {
                    tracing::debug!(generation, "Dropping login result from before a logout");
                    return Ok(());
                }
                self.handle_logged_in(result)?;
            }
        }

        return Ok(());
    }

    fn handle_logged_in(&mut self, result: Result<User>) -> Result<()> {
        match result {
            Ok(user) => {
                self.login_open = false;
                self.notify(
                    NoticeKind::Info,
                    &format!("Signed in as {}.", user.name),
                );
                self.user = Some(user);

                // Session lists are per user. Anonymous lists still in flight are stale.
                if let Some(chatbot) = self.chatbot.clone() {
                    self.chatbot_generation += 1;
                    self.loading_sessions = true;
                    self.tx.send(Action::FetchSessions {
                        generation: self.chatbot_generation,
                        chatbot,
                        user_id: self.user_id(),
                    })?;
                }
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to log in");
                self.notify(NoticeKind::Advisory, "Login failed. Please try again.");
            }
        }

        return Ok(());
    }

    fn handle_bots_loaded(&mut self, result: Result<Vec<String>>) -> Result<()> {
        match result {
            Ok(bots) => self.bots = bots,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to fetch chatbots");
                self.bots = vec![];
            }
        }

        if let Some(preferred) = self.preferred_chatbot.take() {
            self.select_chatbot(&preferred)?;
        }

        return Ok(());
    }

    fn handle_sessions_loaded(&mut self, result: Result<Vec<Session>>) -> Result<()> {
        self.loading_sessions = false;
        match result {
            Ok(sessions) => self.sessions = sessions,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to fetch sessions");
                self.sessions.clear();
                self.messages.clear();
            }
        }

        if let Some(preferred) = self.preferred_session.take() {
            self.select_session(SessionSelection::parse(&preferred))?;
        }

        return Ok(());
    }

    fn handle_message_sent(&mut self, local_id: Uuid, result: Result<Message>) {
        let sent = self
            .messages
            .iter_mut()
            .find(|message| return message.local_id == local_id);

        match result {
            Ok(reply) => {
                if let Some(message) = sent {
                    message.mark_delivered();
                }
                self.messages.push(reply);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to send message");
                if let Some(message) = sent {
                    message.mark_failed(&err.to_string());
                }
                let chatbot = self.chatbot.clone().unwrap_or_default();
                self.messages.push(Message::send_failure(&chatbot));
            }
        }
    }
}
