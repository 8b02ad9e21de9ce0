//! Redis implementation of the conversation state repository.
//!
//! One JSON-encoded record per user under `bot:state:{user_id}`, expiring
//! after the configured TTL so abandoned sessions clean themselves up.
//! `SET NX` / `SET XX` give the create/update existence semantics the hub
//! relies on without a round trip.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;

use crate::domain::conversation::{ConversationState, StateOrdinal};
use crate::domain::foundation::UserId;
use crate::ports::{StateRepository, StateRepositoryError};

const KEY_PREFIX: &str = "bot:state:";

/// Redis-backed state repository.
#[derive(Clone)]
pub struct RedisStateRepository {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisStateRepository {
    /// Creates a new repository over an established connection.
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }

    fn key(user_id: &UserId) -> String {
        format!("{}{}", KEY_PREFIX, user_id.as_str())
    }

    fn encode(state: &ConversationState) -> Result<String, StateRepositoryError> {
        serde_json::to_string(state)
            .map_err(|err| StateRepositoryError::Serialization(err.to_string()))
    }

    fn decode(raw: &str) -> Result<ConversationState, StateRepositoryError> {
        serde_json::from_str(raw)
            .map_err(|err| StateRepositoryError::Deserialization(err.to_string()))
    }

    /// SET with an existence guard; returns whether the write happened.
    async fn guarded_set(
        &self,
        key: &str,
        payload: &str,
        guard: &str,
    ) -> Result<bool, StateRepositoryError> {
        let mut conn = self.conn.clone();
        let outcome: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(payload)
            .arg(guard)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(|err| StateRepositoryError::Store(err.to_string()))?;
        Ok(outcome.is_some())
    }
}

#[async_trait]
impl StateRepository for RedisStateRepository {
    async fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ConversationState>, StateRepositoryError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(Self::key(user_id))
            .await
            .map_err(|err| StateRepositoryError::Store(err.to_string()))?;

        raw.as_deref().map(Self::decode).transpose()
    }

    async fn create(
        &self,
        user_id: &UserId,
        service: &str,
        ordinal: StateOrdinal,
        text: &str,
        cache: Option<Value>,
    ) -> Result<bool, StateRepositoryError> {
        let state = ConversationState::new(user_id.clone(), service, ordinal, text, cache);
        let payload = Self::encode(&state)?;
        self.guarded_set(&Self::key(user_id), &payload, "NX").await
    }

    async fn update(&self, state: &ConversationState) -> Result<bool, StateRepositoryError> {
        let payload = Self::encode(state)?;
        self.guarded_set(&Self::key(&state.user_id), &payload, "XX")
            .await
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, StateRepositoryError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(Self::key(user_id))
            .await
            .map_err(|err| StateRepositoryError::Store(err.to_string()))?;
        Ok(removed > 0)
    }
}
