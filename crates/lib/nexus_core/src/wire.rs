//! JSON bodies exchanged between the chat client and the relay.

use serde::{Deserialize, Serialize};

use crate::persona::Mode;
use crate::turn::{Role, Turn};

/// A single text part of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One prior turn as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl HistoryEntry {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of every part.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

impl From<&HistoryEntry> for Turn {
    fn from(entry: &HistoryEntry) -> Self {
        Turn::new(entry.role, entry.text())
    }
}

/// `POST /api/chat` request body.
///
/// `mode` stays a raw string so the relay can reject unknown personas with
/// its own validation error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub mode: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// `POST /api/chat` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Body of every non-2xx relay response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub modes: Vec<Mode>,
}

/// Body returned for unmatched routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub error: String,
    pub message: String,
    pub endpoints: Vec<String>,
}
