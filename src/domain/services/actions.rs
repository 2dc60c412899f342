#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::TokenStore;
use crate::domain::models::Action;
use crate::domain::models::ChatServiceBox;
use crate::domain::models::Credentials;
use crate::domain::models::Event;
use crate::domain::models::User;

#[derive(Clone)]
struct Worker {
    service: ChatServiceBox,
    credentials: Credentials,
    token_store: TokenStore,
    tx: mpsc::UnboundedSender<Event>,
}

impl Worker {
    async fn login(&self, credential: &str) -> Result<User> {
        let res = self.service.login(credential).await?;
        self.credentials.set(&res.token);

        if let Err(err) = self.token_store.save(&res.token).await {
            tracing::warn!(error = ?err, "Failed to persist bearer token");
        }

        return Ok(res.user);
    }

    async fn logout(&self) {
        self.credentials.clear();
        if let Err(err) = self.token_store.delete().await {
            tracing::warn!(error = ?err, "Failed to remove stored bearer token");
        }
    }

    async fn run(&self, action: Action) -> Result<()> {
        match action {
            Action::FetchBots() => {
                self.tx
                    .send(Event::BotsLoaded(self.service.list_bots().await))?;
            }
            Action::FetchSessions {
                generation,
                chatbot,
                user_id,
            } => {
                let result = self
                    .service
                    .list_sessions(&chatbot, user_id.as_deref())
                    .await;
                self.tx.send(Event::SessionsLoaded { generation, result })?;
            }
            Action::FetchHistory {
                generation,
                session_id,
            } => {
                let result = self.service.fetch_history(&session_id).await;
                self.tx.send(Event::HistoryLoaded { generation, result })?;
            }
            Action::CreateSession {
                generation,
                chatbot,
                user_id,
                name,
                outgoing,
            } => {
                let result = self
                    .service
                    .create_session(&chatbot, user_id.as_deref(), &name)
                    .await;
                self.tx.send(Event::SessionCreated {
                    generation,
                    outgoing,
                    result,
                })?;
            }
            Action::SendMessage {
                generation,
                local_id,
                request,
            } => {
                let result = self.service.send_message(request).await;
                self.tx.send(Event::MessageSent {
                    generation,
                    local_id,
                    result,
                })?;
            }
            Action::Login {
                generation,
                credential,
            } => {
                let result = self.login(&credential).await;
                self.tx.send(Event::LoggedIn { generation, result })?;
            }
            Action::Logout() => {
                self.logout().await;
            }
        }

        return Ok(());
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs until the action channel closes. Remote requests are spawned so
    /// their results arrive in completion order. Login and logout run inline
    /// so every later request sees the credential they leave behind.
    pub async fn start(
        service: ChatServiceBox,
        credentials: Credentials,
        token_store: TokenStore,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let worker = Worker {
            service,
            credentials,
            token_store,
            tx,
        };

        while let Some(action) = rx.recv().await {
            if action.runs_in_order() {
                worker.run(action).await?;
                continue;
            }

            tracing::debug!(action = ?action, "Dispatching request");
            let spawned = worker.clone();
            tokio::spawn(async move {
                if let Err(err) = spawned.run(action).await {
                    tracing::error!(error = ?err, "Request worker failed");
                }
            });
        }

        return Ok(());
    }
}
