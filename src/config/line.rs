//! LINE Messaging API configuration

use serde::Deserialize;

use super::error::ValidationError;

/// LINE channel credentials
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineConfig {
    /// Channel secret used to verify webhook signatures
    pub channel_secret: String,

    /// Long-lived channel access token for the Messaging API
    pub channel_token: String,
}

impl LineConfig {
    /// Validate LINE configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_secret.is_empty() {
            return Err(ValidationError::MissingRequired("LINE_CHANNEL_SECRET"));
        }
        if self.channel_token.is_empty() {
            return Err(ValidationError::MissingRequired("LINE_CHANNEL_TOKEN"));
        }
        Ok(())
    }
}
