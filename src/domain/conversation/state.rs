//! Per-user conversation state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{UserId, ValidationError};

/// A bot service's FSM step, as persisted.
///
/// Ordinal 0 means "idle" and is represented by the *absence* of a state
/// record, never by a persisted record; the constructor therefore rejects 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateOrdinal(u32);

impl StateOrdinal {
    /// Creates an ordinal for an in-progress session step.
    pub fn new(ordinal: u32) -> Result<Self, ValidationError> {
        if ordinal == 0 {
            return Err(ValidationError::invalid_format(
                "ordinal",
                "a persisted state never holds ordinal 0",
            ));
        }
        Ok(Self(ordinal))
    }

    /// Returns the raw ordinal value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// The per-user record driving a multi-turn conversation.
///
/// Softly references one bot service by identifier; the hub resolves the
/// reference every turn. The `cache` slot is opaque here - each service
/// owns a typed shape it decodes explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_id: UserId,
    pub service: String,
    pub ordinal: StateOrdinal,
    /// Accumulated text of the session, extended on every update.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<Value>,
}

impl ConversationState {
    /// Creates a state record for a freshly started session.
    pub fn new(
        user_id: UserId,
        service: impl Into<String>,
        ordinal: StateOrdinal,
        text: impl Into<String>,
        cache: Option<Value>,
    ) -> Self {
        Self {
            user_id,
            service: service.into(),
            ordinal,
            text: text.into(),
            cache,
        }
    }

    /// Appends this turn's text to the accumulated session text.
    pub fn append_text(&mut self, text: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }
}
