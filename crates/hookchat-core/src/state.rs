//! UI-agnostic message types
//!
//! These are shared by every front end and double as the wire shape of the
//! `chatHistory` entries sent to the webhook.

use serde::{Deserialize, Serialize};

/// A single entry in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    /// The remote webhook's reply. Webhook flows know this role as "ai".
    #[serde(rename = "ai", alias = "agent")]
    Agent,
    /// Local notices, such as a failed send
    System,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "ai",
            Sender::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Agent => "AI",
            Sender::System => "System",
        }
    }
}
