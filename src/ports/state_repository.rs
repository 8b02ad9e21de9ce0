//! Conversation state repository port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::{ConversationState, StateOrdinal};
use crate::domain::foundation::{BotError, UserId};

/// Errors that can occur while reaching the state store.
#[derive(Debug, Clone, Error)]
pub enum StateRepositoryError {
    #[error("Failed to serialize state: {0}")]
    Serialization(String),

    #[error("Failed to deserialize state: {0}")]
    Deserialization(String),

    #[error("State store error: {0}")]
    Store(String),
}

impl From<StateRepositoryError> for BotError {
    fn from(err: StateRepositoryError) -> Self {
        match err {
            // A record we wrote but can no longer decode is corruption,
            // not a transport hiccup.
            StateRepositoryError::Deserialization(msg) => BotError::Inconsistency(msg),
            other => BotError::Transport(other.to_string()),
        }
    }
}

/// Port for the per-user conversation state store.
///
/// Records are TTL-bound: an abandoned session expires on its own. The
/// boolean results encode existence checks, not failures - `create` on an
/// existing record and `update`/`delete` on an absent one return `false`
/// and let the caller decide whether that is fatal.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Finds a user's state. Returns `None` when the user is idle.
    async fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ConversationState>, StateRepositoryError>;

    /// Creates a new state record.
    ///
    /// Returns `false` if a record already exists for the user.
    async fn create(
        &self,
        user_id: &UserId,
        service: &str,
        ordinal: StateOrdinal,
        text: &str,
        cache: Option<Value>,
    ) -> Result<bool, StateRepositoryError>;

    /// Updates an existing state record, refreshing its TTL.
    ///
    /// Returns `false` if no record exists for the user.
    async fn update(&self, state: &ConversationState) -> Result<bool, StateRepositoryError>;

    /// Deletes a user's state record.
    ///
    /// Returns `false` if no record existed; that is not an error.
    async fn delete(&self, user_id: &UserId) -> Result<bool, StateRepositoryError>;
}
