//! Adapters - concrete implementations of the ports.

pub mod http;
pub mod line;
pub mod postgres;
pub mod redis;
