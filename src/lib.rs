//! Herald - LINE announcement chat bot.
//!
//! This crate implements a conversational engine for browsing announcements
//! by category, plus a CRUD REST API over the same content store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
