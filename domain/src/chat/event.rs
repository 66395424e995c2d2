//! Streaming events for the chat endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Discriminant of a [`StreamEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamEventKind {
    /// Replaces the transient status line ("Searching records...").
    Status,
    /// A piece of answer text.
    Token,
    /// Advisory end of the answer. The stream may still carry frames.
    Done,
}

/// One event of a chat stream, in wire form `{"type": ..., "content": ...}`.
///
/// `content` is optional on the wire (`{"type":"done"}` is common) and
/// defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "type")]
    pub kind: StreamEventKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl StreamEvent {
    pub fn status(content: impl Into<String>) -> Self {
        Self {
            kind: StreamEventKind::Status,
            content: content.into(),
        }
    }

    pub fn token(content: impl Into<String>) -> Self {
        Self {
            kind: StreamEventKind::Token,
            content: content.into(),
        }
    }

    pub fn done() -> Self {
        Self {
            kind: StreamEventKind::Done,
            content: String::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.kind == StreamEventKind::Done
    }
}
