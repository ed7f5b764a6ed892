use serde::{Deserialize, Serialize};

/// Characters of the first turn shown in a session label.
const SUMMARY_PREFIX_CHARS: usize = 30;

/// Author of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation. Immutable once created; position within
/// the conversation carries the chronology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Immutable snapshot of a conversation, taken after an assistant reply
/// arrives and kept for later recall. Records are only ever appended to the
/// collection or replaced wholesale on load; no record mutates afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub turns: Vec<Turn>,
}

impl SessionRecord {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Short display label: a fixed-length prefix of the first turn's
    /// content. Display-only; never written back to storage.
    pub fn summary(&self) -> String {
        match self.turns.first() {
            Some(first) => {
                let prefix: String = first.content.chars().take(SUMMARY_PREFIX_CHARS).collect();
                format!("{}...", prefix)
            }
            None => "No messages".to_string(),
        }
    }
}
