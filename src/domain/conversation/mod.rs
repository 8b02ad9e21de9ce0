//! Conversation domain - per-user session state.

mod state;

pub use state::{ConversationState, StateOrdinal};
