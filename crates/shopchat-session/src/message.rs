use serde::{Deserialize, Serialize};

/// One chat turn, tagged by who spoke it. Immutable once appended to a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    User { text: String },
    Assistant { text: String },
}

impl ChatMessage {
    /// Create a shopper message
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant { text: text.into() }
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::User { .. } => "user",
            Self::Assistant { .. } => "assistant",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::User { text } | Self::Assistant { text } => text,
        }
    }
}
