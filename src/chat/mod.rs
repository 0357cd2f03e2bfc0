//! Grounded conversational session over a transcript.
//!
//! Dialogue history lives in an owned [`SessionStore`] passed into the
//! session; every turn is grounded by embedding the full transcript in the
//! system prompt.

mod provider;
mod session;

pub use provider::{ChatModel, ChunkStream, OpenAiChat};
pub use session::{ChatSession, TurnOutcome};

use std::collections::HashMap;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    Human,
    Ai,
}

/// One dialogue turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
        }
    }
}

/// Per-session dialogue histories, keyed by session identifier.
///
/// Histories are append-only and created lazily on first mutable access.
/// Owned by the session rather than living in process-global state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Vec<Turn>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The history for a session, empty if the session has never spoken.
    pub fn history(&self, session_id: &str) -> &[Turn] {
        self.sessions
            .get(session_id)
            .map(|h| h.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable history for a session, created on first access.
    pub fn history_mut(&mut self, session_id: &str) -> &mut Vec<Turn> {
        self.sessions.entry(session_id.to_string()).or_default()
    }
}
