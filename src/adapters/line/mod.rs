//! LINE Messaging API adapter: outbound client, webhook route, and
//! signature verification.

mod client;
mod events;
mod signature;
mod webhook;

pub use client::LineClient;
pub use events::{WebhookEvent, WebhookPayload};
pub use signature::validate_signature;
pub use webhook::{line_routes, WebhookState};
