//! The send pipeline: draft -> user message -> webhook -> reply message.
//!
//! A send is split in three steps so a front end can run the network call
//! off its event loop:
//!
//! 1. [`ChatSession::submit`] checks and sets the busy flag, records the
//!    user message and hands back a [`PendingSend`].
//! 2. [`PendingSend::dispatch`] performs the HTTP round trip. It owns
//!    everything it needs and can be moved onto another task.
//! 3. [`ChatSession::resolve`] appends the reply or the error notice and
//!    clears the busy flag.
//!
//! [`ChatSession::send`] runs all three in place.

use anyhow::Result;

use crate::config::Config;
use crate::conversation::Conversation;
use crate::draft::Draft;
use crate::error::SendError;
use crate::state::{Message, Sender};
use crate::webhook::WebhookClient;

pub struct ChatSession {
    conversation: Conversation,
    draft: Draft,
    busy: bool,
    client: WebhookClient,
    history_window: Option<usize>,
}

/// A request that has been accepted but not yet sent
pub struct PendingSend {
    client: WebhookClient,
    message: String,
    history: Vec<Message>,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub async fn dispatch(self) -> Result<String, SendError> {
        self.client.send(&self.message, &self.history).await
    }
}

impl ChatSession {
    pub fn new(client: WebhookClient, history_window: Option<usize>) -> Self {
        Self {
            conversation: Conversation::new(),
            draft: Draft::new(),
            busy: false,
            client,
            history_window,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client =
            WebhookClient::new(config.webhook_url()?, config.user_id(), config.timeout())?;
        Ok(Self::new(client, config.history_window))
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn webhook_url(&self) -> &str {
        self.client.url()
    }

    /// Whether a submit right now would do anything
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.draft.is_blank()
    }

    /// Accept the current draft for sending.
    ///
    /// Returns `None`, leaving everything untouched, when the draft is blank
    /// or another send is still in flight.
    pub fn submit(&mut self) -> Option<PendingSend> {
        if !self.can_submit() {
            return None;
        }
        self.busy = true;

        let message = self.draft.take();
        self.conversation.push(Sender::User, message.clone());

        Some(PendingSend {
            client: self.client.clone(),
            message,
            history: self.conversation.tail(self.history_window).to_vec(),
        })
    }

    /// Record the outcome of a dispatched send and return to idle
    pub fn resolve(&mut self, result: Result<String, SendError>) -> &Message {
        self.busy = false;

        match result {
            Ok(reply) => {
                tracing::info!(chars = reply.chars().count(), "received webhook reply");
                self.conversation.push(Sender::Agent, reply)
            }
            Err(e) => {
                tracing::warn!(error = %e, "webhook send failed");
                self.conversation.push(Sender::System, e.to_chat_text())
            }
        }
    }

    /// Submit, wait for the webhook and resolve, all on the current task.
    /// Returns the appended reply, or `None` if nothing was submitted.
    pub async fn send(&mut self) -> Option<&Message> {
        let pending = self.submit()?;
        let result = pending.dispatch().await;
        Some(self.resolve(result))
    }
}
