//! LINE webhook payload types and their lowering to inbound events.

use serde::Deserialize;

use crate::application::bot::{EventKind, InboundEvent};
use crate::domain::foundation::{Timestamp, UserId};

/// Top-level webhook request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One webhook event. Only user text messages matter to the bot; the
/// variety of other event types all lower to [`EventKind::Other`].
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    /// Epoch milliseconds of the triggering event.
    pub timestamp: i64,
    #[serde(rename = "replyToken", default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Lowers the platform event into the hub's abstract event shape.
    pub fn into_inbound_event(self) -> InboundEvent {
        let timestamp = Timestamp::from_millis(self.timestamp);

        let kind = self.user_text_kind().unwrap_or(EventKind::Other);

        InboundEvent { kind, timestamp }
    }

    fn user_text_kind(&self) -> Option<EventKind> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.as_ref().filter(|m| m.kind == "text")?;
        let source = self.source.as_ref().filter(|s| s.kind == "user")?;

        let user_id = UserId::new(source.user_id.clone()?).ok()?;
        let text = message.text.clone()?;
        let reply_token = self.reply_token.clone()?;

        Some(EventKind::UserText {
            user_id,
            text,
            reply_token,
        })
    }
}
