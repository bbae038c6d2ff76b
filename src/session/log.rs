use crate::types::{Message, MessageRole};

/// Append-only conversation with a fixed leading system turn.
///
/// Stored turns are never handed out mutably; the only way to shrink the log
/// is [`ConversationLog::reset`], which keeps the system turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationLog {
    turns: Vec<Message>,
}

impl ConversationLog {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Message::system(system_prompt)],
        }
    }

    pub fn system(&self) -> &Message {
        &self.turns[0]
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: the system turn cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of completed user/assistant exchanges.
    pub fn exchanges(&self) -> usize {
        self.turns
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Message::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Message::assistant(text));
    }

    /// Append a completed exchange: the user turn followed by its reply.
    pub fn record_exchange(&mut self, user_text: impl Into<String>, reply: impl Into<String>) {
        self.push_user(user_text);
        self.push_assistant(reply);
    }

    pub fn reset(&mut self) {
        self.turns.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_has_only_system_turn() {
        let log = ConversationLog::new("You are a helpful assistant");
        assert_eq!(log.len(), 1);
        assert_eq!(log.system().role, MessageRole::System);
        assert_eq!(log.exchanges(), 0);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut log = ConversationLog::new("sys");
        log.reset();
        assert_eq!(log.len(), 1);
        log.push_user("hi");
        log.push_assistant("hello");
        log.push_user("again");
        log.reset();
        log.reset();
        assert_eq!(log.turns(), &[Message::system("sys")]);
    }

    #[test]
    fn test_record_exchange_keeps_alternation() {
        let mut log = ConversationLog::new("sys");
        log.record_exchange("q", "a");
        log.record_exchange("q2", "a2");
        let roles: Vec<_> = log.turns().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
        assert_eq!(log.exchanges(), 2);
    }
}
