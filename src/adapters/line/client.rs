//! Reqwest-based LINE Messaging API client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::messaging::OutgoingMessage;
use crate::ports::{MessageTransport, TransportError};

const DEFAULT_BASE_URL: &str = "https://api.line.me";

#[derive(Serialize)]
struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    reply_token: &'a str,
    messages: Vec<OutgoingMessage>,
}

#[derive(Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<OutgoingMessage>,
}

/// LINE Messaging API client implementing the outbound transport port.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    channel_token: SecretString,
    base_url: String,
}

impl LineClient {
    /// Creates a client against the production LINE endpoint.
    pub fn new(http: reqwest::Client, channel_token: SecretString) -> Self {
        Self {
            http,
            channel_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (for tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<(), TransportError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(self.channel_token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|err| TransportError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MessageTransport for LineClient {
    async fn reply(
        &self,
        reply_token: &str,
        message: OutgoingMessage,
    ) -> Result<(), TransportError> {
        self.post(
            "/v2/bot/message/reply",
            &ReplyRequest {
                reply_token,
                messages: vec![message],
            },
        )
        .await
    }

    async fn push(
        &self,
        user_id: &UserId,
        messages: Vec<OutgoingMessage>,
    ) -> Result<(), TransportError> {
        self.post(
            "/v2/bot/message/push",
            &PushRequest {
                to: user_id.as_str(),
                messages,
            },
        )
        .await
    }
}
