//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `StateRepository` - per-user conversation state with TTL semantics
//! - `CategoryRepository` / `AnnouncementRepository` - content store
//! - `MessageTransport` - outbound messaging (reply and push)

mod announcement_repository;
mod category_repository;
mod message_transport;
mod state_repository;

pub use announcement_repository::{AnnouncementQuery, AnnouncementRepository};
pub use category_repository::CategoryRepository;
pub use message_transport::{MessageTransport, TransportError};
pub use state_repository::{StateRepository, StateRepositoryError};

use thiserror::Error;

/// Errors surfaced by the content repositories.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        RepositoryError::Duplicate {
            field,
            value: value.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        RepositoryError::Database(message.into())
    }
}

impl From<RepositoryError> for crate::domain::foundation::BotError {
    fn from(err: RepositoryError) -> Self {
        crate::domain::foundation::BotError::Transport(err.to_string())
    }
}
