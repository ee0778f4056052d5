//! Conversation message types.
//!
//! Holds the user/assistant exchange history passed to the completion
//! endpoint, with a sliding-window length invariant: the history never grows
//! past its cap, and the oldest entries are the ones dropped.

use serde::{Deserialize, Serialize};

/// Default cap on the conversation history length.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::stamped(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::stamped(MessageRole::Assistant, content)
    }

    fn stamped(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The bounded conversation history.
///
/// Session-scoped and never persisted. Appends do not trim on their own;
/// callers apply [`ConversationHistory::trim_to_limit`] once per completed
/// exchange, after appending, so a failed exchange leaves the history
/// untouched.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<ConversationMessage>,
    limit: usize,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit,
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::assistant(content));
    }

    /// Drops entries from the front until the length invariant holds.
    pub fn trim_to_limit(&mut self) {
        if self.messages.len() > self.limit {
            let excess = self.messages.len() - self.limit;
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut history = ConversationHistory::new();
        history.push_user("hello");
        history.push_assistant("hi there");

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0].role, MessageRole::User);
        assert_eq!(history.messages()[1].role, MessageRole::Assistant);
    }

    #[test]
    fn test_trim_drops_oldest_first() {
        let mut history = ConversationHistory::with_limit(4);
        for i in 0..3 {
            history.push_user(format!("question {i}"));
            history.push_assistant(format!("answer {i}"));
        }

        history.trim_to_limit();
        assert_eq!(history.len(), 4);
        assert_eq!(history.messages()[0].content, "question 1");
        assert_eq!(history.messages()[3].content, "answer 2");
    }

    #[test]
    fn test_never_exceeds_limit_over_many_exchanges() {
        let mut history = ConversationHistory::new();
        for i in 0..50 {
            history.push_user(format!("q{i}"));
            history.push_assistant(format!("a{i}"));
            history.trim_to_limit();
            assert!(history.len() <= DEFAULT_HISTORY_LIMIT);
        }
        // Newest entries survive.
        assert_eq!(history.messages().last().unwrap().content, "a49");
    }
}
