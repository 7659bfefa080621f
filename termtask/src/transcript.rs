//! Append-only chat transcript with handle-based pending placeholders.
//!
//! Messages are never removed or reordered; a send-in-flight is shown as
//! a placeholder assistant entry that is later replaced *by token*, never
//! by position, so two overlapping sends cannot resolve each other's
//! bubble.

use std::collections::HashMap;

use termtask_core::chat::Role;

/// Placeholder text shown while a reply is in flight.
pub const PENDING_PLACEHOLDER: &str = "...";

/// Handle identifying one pending placeholder entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingToken(u64);

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who authored the line.
    pub role: Role,
    /// Line text; may be multi-line.
    pub text: String,
    /// Formatted wall-clock time the line was posted.
    pub timestamp: String,
}

/// The session's ordered user/assistant exchange log.
#[derive(Debug)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    /// Token -> index of the placeholder entry it will replace.
    pending: HashMap<PendingToken, usize>,
    next_token: u64,
    timestamp_format: String,
}

impl ChatTranscript {
    /// Creates an empty transcript using the given chrono format string
    /// for timestamps.
    #[must_use]
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            pending: HashMap::new(),
            next_token: 1,
            timestamp_format: timestamp_format.into(),
        }
    }

    /// Appends a line.
    pub fn post(&mut self, role: Role, text: impl Into<String>) {
        let timestamp = self.now();
        self.messages.push(ChatMessage {
            role,
            text: text.into(),
            timestamp,
        });
    }

    /// Appends a pending assistant placeholder and returns its token.
    pub fn begin_pending(&mut self) -> PendingToken {
        let token = PendingToken(self.next_token);
        self.next_token += 1;
        self.post(Role::Assistant, PENDING_PLACEHOLDER);
        self.pending.insert(token, self.messages.len() - 1);
        token
    }

    /// Replaces the placeholder identified by `token` with the real text.
    ///
    /// Returns `false` if the token was already resolved or never issued.
    pub fn resolve_pending(&mut self, token: PendingToken, text: impl Into<String>) -> bool {
        let Some(index) = self.pending.remove(&token) else {
            return false;
        };
        if let Some(entry) = self.messages.get_mut(index) {
            entry.text = text.into();
            entry.timestamp = chrono::Local::now().format(&self.timestamp_format).to_string();
            true
        } else {
            false
        }
    }

    /// Returns `true` if the entry at `index` is an unresolved placeholder.
    #[must_use]
    pub fn is_pending(&self, index: usize) -> bool {
        self.pending.values().any(|&i| i == index)
    }

    /// All lines in posting order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been posted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn now(&self) -> String {
        chrono::Local::now().format(&self.timestamp_format).to_string()
    }
}
