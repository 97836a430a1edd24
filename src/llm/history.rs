//! Conversation history for one chat session.

use crate::llm::models::LlmMessage;
use serde::{Deserialize, Serialize};

/// Append-only log of the messages exchanged in a session.
///
/// Messages are only ever pushed; the sole way to remove them is
/// [`ConversationHistory::clear`], which drops everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<LlmMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: LlmMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[LlmMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&LlmMessage> {
        self.messages.last()
    }

    /// Drop every message. Clearing an empty history is a no-op.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The outbound message list: `system` followed by the whole history.
    pub fn with_system_prompt(&self, system_prompt: &str) -> Vec<LlmMessage> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.push(LlmMessage::system(system_prompt));
        messages.extend(self.messages.iter().cloned());
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::MessageRole;

    #[test]
    fn test_new_history_is_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.last().is_none());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut history = ConversationHistory::new();
        history.push(LlmMessage::user("one"));
        history.push(LlmMessage::assistant("two"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0].content.as_deref(), Some("one"));
        assert_eq!(history.last().and_then(|m| m.content.as_deref()), Some("two"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut history = ConversationHistory::new();
        history.push(LlmMessage::user("hi"));

        history.clear();
        assert!(history.is_empty());

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_with_system_prompt_prepends() {
        let mut history = ConversationHistory::new();
        history.push(LlmMessage::user("hi"));

        let outbound = history.with_system_prompt("Be nice.");

        assert_eq!(outbound.len(), 2);
        assert_eq!(outbound[0].role, MessageRole::System);
        assert_eq!(outbound[0].content.as_deref(), Some("Be nice."));
        assert_eq!(outbound[1].role, MessageRole::User);
        // history itself never stores the system prompt
        assert_eq!(history.len(), 1);
    }
}
