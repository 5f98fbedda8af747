use chrono::Utc;

use crate::state::{Message, Sender};

/// Append-only log of the messages exchanged in this session.
///
/// Ids come from the wall clock in milliseconds, bumped past the previous
/// id whenever the clock has not moved on, so they stay unique and
/// strictly increasing.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    last_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message stamped with the next id and append it
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &Message {
        let id = self.next_id();
        self.append(Message {
            id,
            text: text.into(),
            sender,
        })
    }

    fn append(&mut self, msg: Message) -> &Message {
        self.last_id = msg.id;
        self.messages.push(msg);
        &self.messages[self.messages.len() - 1]
    }

    /// Full ordered history
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// The trailing `window` messages, or everything when `window` is `None`
    pub fn tail(&self, window: Option<usize>) -> &[Message] {
        match window {
            Some(n) => &self.messages[self.messages.len().saturating_sub(n)..],
            None => &self.messages,
        }
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    fn next_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        now.max(self.last_id + 1)
    }
}
