//! Conversation transcript
//!
//! The log is append-only. System notices (welcome text, error banners) live
//! in the same transcript as real turns but never leave the client.

use serde::{Deserialize, Serialize};

/// Who said it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Locally synthesized notice, excluded from every backend payload
    pub is_system: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            is_system: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            is_system: false,
        }
    }

    pub fn notice(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            is_system: true,
        }
    }
}

/// Ordered, append-only message log
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn. Callers reject empty input before getting here.
    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    pub fn append_system_notice(&mut self, text: impl Into<String>) {
        self.messages.push(Message::notice(text));
    }

    /// Non-system messages in arrival order.
    ///
    /// This is a view over the live log; collect it once at request start to
    /// get the payload snapshot.
    pub fn for_backend(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter().filter(|m| !m.is_system)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
