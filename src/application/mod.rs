//! Application layer - the conversational engine.

pub mod bot;
