//! Redis-backed conversation state store.

mod state_repository;

pub use state_repository::RedisStateRepository;
