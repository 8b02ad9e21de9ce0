//! Conversation hub - per-event orchestration.

use std::sync::Arc;

use crate::domain::foundation::{BotError, Timestamp, UserId};
use crate::domain::messaging::{format_messages, replies, FormattedMessages, Message};
use crate::ports::{MessageTransport, StateRepository};

use super::service::{ServiceRegistry, TurnRequest, TurnResult};

/// What an inbound delivery carries.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// A text message from an individual user.
    UserText {
        user_id: UserId,
        text: String,
        /// Single-use token, valid only for this event.
        reply_token: String,
    },
    /// Anything else: joins, stickers, group traffic. Silently ignored.
    Other,
}

/// One inbound delivery, platform-neutral.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub kind: EventKind,
    pub timestamp: Timestamp,
}

/// Outcome of one delivery, for the webhook layer's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// The event produced a bot turn (possibly a one-shot error reply).
    Handled,
    /// The event was not a user text message; explicit success, no
    /// side effects.
    Ignored,
}

/// Orchestrates one conversational turn per inbound event.
///
/// Resolves the active service, invokes it, applies the state
/// transition, then formats and dispatches the output. Performs no
/// locking around the read-modify-write over a user's state: two
/// concurrent deliveries for one user race at last-writer-wins, and
/// platform redelivery covers the rest.
pub struct BotHub {
    registry: Arc<ServiceRegistry>,
    states: Arc<dyn StateRepository>,
    transport: Arc<dyn MessageTransport>,
}

impl BotHub {
    pub fn new(
        registry: Arc<ServiceRegistry>,
        states: Arc<dyn StateRepository>,
        transport: Arc<dyn MessageTransport>,
    ) -> Self {
        Self {
            registry,
            states,
            transport,
        }
    }

    /// Handles one inbound event.
    ///
    /// # Errors
    ///
    /// Propagates [`BotError::Inconsistency`] and [`BotError::Transport`]
    /// to the caller, which owns delivery acknowledgement; user-correctable
    /// problems never surface here.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<TurnStatus, BotError> {
        let EventKind::UserText {
            user_id,
            text,
            reply_token,
        } = event.kind
        else {
            return Ok(TurnStatus::Ignored);
        };

        // Deliberate tolerance for casing in commands and category names.
        let text = text.trim().to_lowercase();

        let state = self.states.find_by_id(&user_id).await?;

        let service = match &state {
            // A stored state referencing an unregistered service is a
            // consistency bug, not user error.
            Some(state) => self.registry.resolve(&state.service).ok_or_else(|| {
                BotError::inconsistency(format!(
                    "stored state references unregistered service '{}'",
                    state.service
                ))
            })?,
            // No session: route on the first token. An unmatched token is
            // the "unidentifiable" reply path, not an error.
            None => {
                let command = text.split_whitespace().next().unwrap_or_default();
                match self.registry.resolve(command) {
                    Some(service) => service,
                    None => {
                        self.dispatch(
                            &user_id,
                            &reply_token,
                            &[Message::text(replies::UNIDENTIFIABLE)],
                        )
                        .await?;
                        return Ok(TurnStatus::Handled);
                    }
                }
            }
        };

        let turn = TurnRequest {
            ordinal: state.as_ref().map(|s| s.ordinal.get()).unwrap_or(0),
            text: text.clone(),
            timestamp: event.timestamp,
            cache: state.as_ref().and_then(|s| s.cache.clone()),
        };

        let result = match service.handle(turn).await {
            Ok(result) => result,
            // One-shot explanatory reply; prior state stays authoritative.
            Err(BotError::User(message)) => {
                self.dispatch(&user_id, &reply_token, &[Message::text(message)])
                    .await?;
                return Ok(TurnStatus::Handled);
            }
            Err(other) => return Err(other),
        };

        match &result {
            TurnResult::UserError { .. } => {}
            TurnResult::Complete { .. } => {
                // Idempotent: deleting an absent record is not an error.
                self.states.delete(&user_id).await?;
            }
            TurnResult::InProgress {
                ordinal, cache, ..
            } => match state {
                None => {
                    let created = self
                        .states
                        .create(&user_id, service.identifier(), *ordinal, &text, cache.clone())
                        .await?;
                    if !created {
                        return Err(BotError::inconsistency(format!(
                            "state for user {} already exists on create",
                            user_id
                        )));
                    }
                }
                Some(mut existing) => {
                    existing.append_text(&text);
                    existing.ordinal = *ordinal;
                    existing.cache = cache.clone();
                    let updated = self.states.update(&existing).await?;
                    if !updated {
                        return Err(BotError::inconsistency(format!(
                            "state for user {} vanished on update",
                            user_id
                        )));
                    }
                }
            },
        }

        self.dispatch(&user_id, &reply_token, result.messages())
            .await?;
        Ok(TurnStatus::Handled)
    }

    /// Formats and sends: a single lowered message goes over the reply
    /// transport, a batch over the push transport.
    async fn dispatch(
        &self,
        user_id: &UserId,
        reply_token: &str,
        messages: &[Message],
    ) -> Result<(), BotError> {
        match format_messages(messages)? {
            FormattedMessages::Single(message) => {
                self.transport.reply(reply_token, message).await?
            }
            FormattedMessages::Batch(messages) => self.transport.push(user_id, messages).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bot::service::BotService;
    use crate::domain::conversation::{ConversationState, StateOrdinal};
    use crate::domain::messaging::OutgoingMessage;
    use crate::ports::{StateRepositoryError, TransportError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryStateRepository {
        records: Mutex<HashMap<String, ConversationState>>,
    }

    impl InMemoryStateRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
            }
        }

        fn with_state(state: ConversationState) -> Self {
            let repo = Self::new();
            repo.records
                .lock()
                .unwrap()
                .insert(state.user_id.as_str().to_string(), state);
            repo
        }

        fn get(&self, user_id: &str) -> Option<ConversationState> {
            self.records.lock().unwrap().get(user_id).cloned()
        }
    }

    #[async_trait]
    impl StateRepository for InMemoryStateRepository {
        async fn find_by_id(
            &self,
            user_id: &UserId,
        ) -> Result<Option<ConversationState>, StateRepositoryError> {
            Ok(self.records.lock().unwrap().get(user_id.as_str()).cloned())
        }

        async fn create(
            &self,
            user_id: &UserId,
            service: &str,
            ordinal: StateOrdinal,
            text: &str,
            cache: Option<Value>,
        ) -> Result<bool, StateRepositoryError> {
            let mut records = self.records.lock().unwrap();
            if records.contains_key(user_id.as_str()) {
                return Ok(false);
            }
            records.insert(
                user_id.as_str().to_string(),
                ConversationState::new(user_id.clone(), service, ordinal, text, cache),
            );
            Ok(true)
        }

        async fn update(
            &self,
            state: &ConversationState,
        ) -> Result<bool, StateRepositoryError> {
            let mut records = self.records.lock().unwrap();
            if !records.contains_key(state.user_id.as_str()) {
                return Ok(false);
            }
            records.insert(state.user_id.as_str().to_string(), state.clone());
            Ok(true)
        }

        async fn delete(&self, user_id: &UserId) -> Result<bool, StateRepositoryError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .remove(user_id.as_str())
                .is_some())
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        replies: Mutex<Vec<(String, OutgoingMessage)>>,
        pushes: Mutex<Vec<(String, Vec<OutgoingMessage>)>>,
    }

    #[async_trait]
    impl MessageTransport for RecordingTransport {
        async fn reply(
            &self,
            reply_token: &str,
            message: OutgoingMessage,
        ) -> Result<(), TransportError> {
            self.replies
                .lock()
                .unwrap()
                .push((reply_token.to_string(), message));
            Ok(())
        }

        async fn push(
            &self,
            user_id: &UserId,
            messages: Vec<OutgoingMessage>,
        ) -> Result<(), TransportError> {
            self.pushes
                .lock()
                .unwrap()
                .push((user_id.as_str().to_string(), messages));
            Ok(())
        }
    }

    /// Scripted service: maps input text to a fixed result.
    struct ScriptedService {
        results: HashMap<String, TurnResult>,
    }

    #[async_trait]
    impl BotService for ScriptedService {
        fn identifier(&self) -> &'static str {
            "scripted"
        }

        async fn handle(&self, turn: TurnRequest) -> Result<TurnResult, BotError> {
            self.results
                .get(&turn.text)
                .cloned()
                .ok_or_else(|| BotError::inconsistency("unscripted input"))
        }
    }

    fn hub_with(
        results: Vec<(&str, TurnResult)>,
        states: Arc<InMemoryStateRepository>,
        transport: Arc<RecordingTransport>,
    ) -> BotHub {
        let service = ScriptedService {
            results: results
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        };
        let registry = ServiceRegistry::new(vec![Arc::new(service)]).unwrap();
        BotHub::new(Arc::new(registry), states, transport)
    }

    fn user_text(text: &str) -> InboundEvent {
        InboundEvent {
            kind: EventKind::UserText {
                user_id: UserId::new("U1").unwrap(),
                text: text.to_string(),
                reply_token: "tok".to_string(),
            },
            timestamp: Timestamp::from_millis(1_000),
        }
    }

    #[tokio::test]
    async fn non_text_events_are_silent_no_ops() {
        let states = Arc::new(InMemoryStateRepository::new());
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(vec![], states.clone(), transport.clone());

        let status = hub
            .handle_event(InboundEvent {
                kind: EventKind::Other,
                timestamp: Timestamp::from_millis(0),
            })
            .await
            .unwrap();

        assert_eq!(status, TurnStatus::Ignored);
        assert!(transport.replies.lock().unwrap().is_empty());
        assert!(transport.pushes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmatched_token_replies_unidentifiable_without_state() {
        let states = Arc::new(InMemoryStateRepository::new());
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(vec![], states.clone(), transport.clone());

        let status = hub.handle_event(user_text("makan siang")).await.unwrap();

        assert_eq!(status, TurnStatus::Handled);
        assert!(states.get("U1").is_none());
        let replies = transport.replies.lock().unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(
            replies[0].1,
            OutgoingMessage::text(replies::UNIDENTIFIABLE)
        );
    }

    #[tokio::test]
    async fn complete_turn_replies_and_leaves_no_state() {
        let states = Arc::new(InMemoryStateRepository::new());
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(
            vec![(
                "scripted",
                TurnResult::Complete {
                    messages: vec![Message::text("selesai")],
                },
            )],
            states.clone(),
            transport.clone(),
        );

        hub.handle_event(user_text("Scripted")).await.unwrap();

        assert!(states.get("U1").is_none());
        assert_eq!(transport.replies.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn in_progress_turn_creates_state_and_pushes_batches() {
        let states = Arc::new(InMemoryStateRepository::new());
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(
            vec![(
                "scripted",
                TurnResult::InProgress {
                    ordinal: StateOrdinal::new(1).unwrap(),
                    messages: vec![Message::text("satu"), Message::text("dua")],
                    cache: Some(json!({ "next_page": 2 })),
                },
            )],
            states.clone(),
            transport.clone(),
        );

        hub.handle_event(user_text("SCRIPTED")).await.unwrap();

        let stored = states.get("U1").unwrap();
        assert_eq!(stored.service, "scripted");
        assert_eq!(stored.ordinal.get(), 1);
        assert_eq!(stored.cache, Some(json!({ "next_page": 2 })));

        // two messages lower to push, not reply
        assert!(transport.replies.lock().unwrap().is_empty());
        let pushes = transport.pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].0, "U1");
        assert_eq!(pushes[0].1.len(), 2);
    }

    #[tokio::test]
    async fn in_progress_turn_updates_existing_state_and_accumulates_text() {
        let existing = ConversationState::new(
            UserId::new("U1").unwrap(),
            "scripted",
            StateOrdinal::new(1).unwrap(),
            "scripted",
            None,
        );
        let states = Arc::new(InMemoryStateRepository::with_state(existing));
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(
            vec![(
                "lagi",
                TurnResult::InProgress {
                    ordinal: StateOrdinal::new(2).unwrap(),
                    messages: vec![Message::text("oke")],
                    cache: None,
                },
            )],
            states.clone(),
            transport.clone(),
        );

        hub.handle_event(user_text("Lagi")).await.unwrap();

        let stored = states.get("U1").unwrap();
        assert_eq!(stored.ordinal.get(), 2);
        assert_eq!(stored.text, "scripted lagi");
    }

    #[tokio::test]
    async fn complete_turn_deletes_existing_state() {
        let existing = ConversationState::new(
            UserId::new("U1").unwrap(),
            "scripted",
            StateOrdinal::new(1).unwrap(),
            "scripted",
            None,
        );
        let states = Arc::new(InMemoryStateRepository::with_state(existing));
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(
            vec![(
                "akhiri",
                TurnResult::Complete {
                    messages: vec![Message::text("sampai jumpa")],
                },
            )],
            states.clone(),
            transport.clone(),
        );

        hub.handle_event(user_text("akhiri")).await.unwrap();

        assert!(states.get("U1").is_none());
    }

    #[tokio::test]
    async fn user_error_result_sends_messages_but_mutates_nothing() {
        let existing = ConversationState::new(
            UserId::new("U1").unwrap(),
            "scripted",
            StateOrdinal::new(1).unwrap(),
            "scripted",
            Some(json!({ "next_page": 3 })),
        );
        let states = Arc::new(InMemoryStateRepository::with_state(existing.clone()));
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(
            vec![(
                "salah",
                TurnResult::UserError {
                    messages: vec![Message::text("kategori tidak ada")],
                },
            )],
            states.clone(),
            transport.clone(),
        );

        hub.handle_event(user_text("salah")).await.unwrap();

        // state untouched, including accumulated text and cache
        assert_eq!(states.get("U1").unwrap(), existing);
        assert_eq!(transport.replies.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stored_state_with_unregistered_service_is_fatal() {
        let existing = ConversationState::new(
            UserId::new("U1").unwrap(),
            "ghost",
            StateOrdinal::new(1).unwrap(),
            "ghost",
            None,
        );
        let states = Arc::new(InMemoryStateRepository::with_state(existing));
        let transport = Arc::new(RecordingTransport::default());
        let hub = hub_with(vec![], states, transport.clone());

        let err = hub.handle_event(user_text("apapun")).await.unwrap_err();
        assert!(matches!(err, BotError::Inconsistency(_)));
        // fatal turns produce no user-facing message
        assert!(transport.replies.lock().unwrap().is_empty());
        assert!(transport.pushes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn service_user_error_becomes_a_one_shot_reply() {
        struct GrumpyService;

        #[async_trait]
        impl BotService for GrumpyService {
            fn identifier(&self) -> &'static str {
                "grumpy"
            }

            async fn handle(&self, _turn: TurnRequest) -> Result<TurnResult, BotError> {
                Err(BotError::user("coba lagi"))
            }
        }

        let states = Arc::new(InMemoryStateRepository::new());
        let transport = Arc::new(RecordingTransport::default());
        let registry = ServiceRegistry::new(vec![Arc::new(GrumpyService)]).unwrap();
        let hub = BotHub::new(Arc::new(registry), states.clone(), transport.clone());

        hub.handle_event(user_text("grumpy")).await.unwrap();

        assert!(states.get("U1").is_none());
        let replies = transport.replies.lock().unwrap();
        assert_eq!(replies[0].1, OutgoingMessage::text("coba lagi"));
    }
}
