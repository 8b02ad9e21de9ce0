//! LINE webhook endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use futures::future::join_all;
use secrecy::{ExposeSecret, SecretString};

use crate::application::bot::BotHub;

use super::events::WebhookPayload;
use super::signature::validate_signature;

const SIGNATURE_HEADER: &str = "x-line-signature";

/// Shared state for the webhook route.
#[derive(Clone)]
pub struct WebhookState {
    hub: Arc<BotHub>,
    channel_secret: SecretString,
}

impl WebhookState {
    pub fn new(hub: Arc<BotHub>, channel_secret: SecretString) -> Self {
        Self {
            hub,
            channel_secret,
        }
    }
}

/// Creates the LINE webhook router.
pub fn line_routes(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .with_state(state)
}

/// POST /webhook - verify, parse, and fan out the event batch.
///
/// User-correctable problems are already absorbed inside the hub; an
/// error surfacing here is internal, so it is traced and the whole
/// delivery answers 500, leaving redelivery to the platform.
async fn handle_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !validate_signature(state.channel_secret.expose_secret(), &body, signature) {
        tracing::warn!("webhook delivery rejected: bad or missing signature");
        return StatusCode::UNAUTHORIZED;
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "webhook delivery rejected: malformed body");
            return StatusCode::BAD_REQUEST;
        }
    };

    let turns = payload
        .events
        .into_iter()
        .map(|event| state.hub.handle_event(event.into_inbound_event()));

    let mut failed = false;
    for result in join_all(turns).await {
        if let Err(err) = result {
            tracing::error!(error = %err, "bot turn failed");
            failed = true;
        }
    }

    if failed {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}
