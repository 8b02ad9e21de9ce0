//! Outbound message transport port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{BotError, UserId};
use crate::domain::messaging::OutgoingMessage;

/// Errors that can occur while reaching the messaging platform.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Messaging platform rejected the request: {status} {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to reach the messaging platform: {0}")]
    Connection(String),
}

impl From<TransportError> for BotError {
    fn from(err: TransportError) -> Self {
        BotError::Transport(err.to_string())
    }
}

/// Port for delivering messages back to the user.
///
/// `reply` consumes the event's single-use reply token and may be called
/// at most once per event; `push` addresses the durable user id and is
/// repeatable. The formatter's single-vs-batch output decides which one
/// the hub calls.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Sends one message using the event's reply token.
    async fn reply(
        &self,
        reply_token: &str,
        message: OutgoingMessage,
    ) -> Result<(), TransportError>;

    /// Pushes a message sequence to the user by durable id.
    async fn push(
        &self,
        user_id: &UserId,
        messages: Vec<OutgoingMessage>,
    ) -> Result<(), TransportError>;
}
