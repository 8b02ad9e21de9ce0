//! Bot service contract and the service registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::conversation::StateOrdinal;
use crate::domain::foundation::{BotError, Timestamp};
use crate::domain::messaging::Message;

/// One conversational turn as seen by a bot service.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// The stored FSM step, or 0 when the user has no session.
    pub ordinal: u32,
    /// This turn's text, already trimmed and lowercased by the hub.
    pub text: String,
    /// Timestamp of the triggering event, not of processing.
    pub timestamp: Timestamp,
    /// The service's opaque cache from the previous turn, if any.
    pub cache: Option<Value>,
}

/// The outcome of one turn.
///
/// Replaces the legacy convention of encoding "done", "step n" and
/// "user mistake" into one signed ordinal: each case now says exactly
/// what the hub must do with stored state.
#[derive(Debug, Clone)]
pub enum TurnResult {
    /// The session is over; any stored state is deleted.
    Complete { messages: Vec<Message> },
    /// The session continues at `ordinal`; state is created or updated
    /// and `cache` replaces the stored cache.
    InProgress {
        ordinal: StateOrdinal,
        messages: Vec<Message>,
        cache: Option<Value>,
    },
    /// The user made a correctable mistake; messages are sent and stored
    /// state is left fully untouched.
    UserError { messages: Vec<Message> },
}

impl TurnResult {
    pub fn messages(&self) -> &[Message] {
        match self {
            TurnResult::Complete { messages }
            | TurnResult::InProgress { messages, .. }
            | TurnResult::UserError { messages } => messages,
        }
    }
}

/// A pluggable conversational unit.
///
/// Implementations are stateless: everything a turn needs arrives in the
/// [`TurnRequest`] and everything it wants to remember leaves in the
/// [`TurnResult`]. The identifier doubles as the routing keyword for new
/// sessions and as the service key in stored state.
#[async_trait]
pub trait BotService: Send + Sync {
    /// Globally unique identifier, lowercase.
    fn identifier(&self) -> &'static str;

    /// Handles one turn.
    ///
    /// A service receiving an ordinal it could not have produced must
    /// return [`BotError::Inconsistency`]; that defends against store
    /// corruption.
    async fn handle(&self, turn: TurnRequest) -> Result<TurnResult, BotError>;
}

/// Immutable identifier-to-service mapping, built once at startup.
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn BotService>>,
}

impl ServiceRegistry {
    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Inconsistency`] on duplicate identifiers;
    /// routing would otherwise be ambiguous.
    pub fn new(services: Vec<Arc<dyn BotService>>) -> Result<Self, BotError> {
        let mut map: HashMap<String, Arc<dyn BotService>> = HashMap::with_capacity(services.len());

        for service in services {
            let key = service.identifier().to_lowercase();
            if map.insert(key.clone(), service).is_some() {
                return Err(BotError::inconsistency(format!(
                    "duplicate bot service identifier '{}'",
                    key
                )));
            }
        }

        Ok(Self { services: map })
    }

    /// Resolves a service by identifier, case-insensitively.
    pub fn resolve(&self, identifier: &str) -> Option<Arc<dyn BotService>> {
        self.services.get(&identifier.to_lowercase()).cloned()
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
