//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: usize, max: usize, actual: usize) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error taxonomy for the conversational engine.
///
/// - `User` is fixable by re-asking and is converted into a one-shot reply
///   at the hub boundary; it is never persisted or reported as an incident.
/// - `Inconsistency` marks a structurally impossible state (unregistered
///   service in stored state, out-of-range ordinal, double create).
/// - `Transport` wraps failures reaching the store, repositories, or the
///   messaging platform. Retry policy belongs to the delivery layer.
#[derive(Debug, Clone, Error)]
pub enum BotError {
    #[error("{0}")]
    User(String),

    #[error("Internal consistency violation: {0}")]
    Inconsistency(String),

    #[error("Transport failure: {0}")]
    Transport(String),
}

impl BotError {
    /// Creates a user-correctable error.
    pub fn user(message: impl Into<String>) -> Self {
        BotError::User(message.into())
    }

    /// Creates an internal consistency error.
    pub fn inconsistency(message: impl Into<String>) -> Self {
        BotError::Inconsistency(message.into())
    }

    /// Creates a transport-level error.
    pub fn transport(message: impl Into<String>) -> Self {
        BotError::Transport(message.into())
    }

    /// Returns `true` when the error should surface as a reply to the user.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, BotError::User(_))
    }
}

impl From<ValidationError> for BotError {
    fn from(err: ValidationError) -> Self {
        BotError::Inconsistency(err.to_string())
    }
}

// A message that cannot be constructed or lowered is a programming error,
// never something the user can correct.
impl From<crate::domain::messaging::MessagingError> for BotError {
    fn from(err: crate::domain::messaging::MessagingError) -> Self {
        BotError::Inconsistency(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("items", 1, 10, 12);
        assert_eq!(
            format!("{}", err),
            "Field 'items' must be between 1 and 10, got 12"
        );
    }

    #[test]
    fn user_error_displays_bare_message() {
        let err = BotError::user("unknown category");
        assert_eq!(format!("{}", err), "unknown category");
        assert!(err.is_user_correctable());
    }

    #[test]
    fn internal_errors_are_not_user_correctable() {
        assert!(!BotError::inconsistency("bad ordinal").is_user_correctable());
        assert!(!BotError::transport("redis down").is_user_correctable());
    }

    #[test]
    fn validation_errors_convert_to_inconsistency() {
        let err: BotError = ValidationError::empty_field("name").into();
        assert!(matches!(err, BotError::Inconsistency(_)));
    }

    #[test]
    fn messaging_errors_convert_to_inconsistency() {
        use crate::domain::messaging::{Message, MessagingError};

        let err: BotError = MessagingError::EmptySequence.into();
        assert!(matches!(err, BotError::Inconsistency(_)));

        // the `?` path services use when building a carousel
        fn build() -> Result<Message, BotError> {
            Ok(Message::carousel(vec![])?)
        }
        assert!(matches!(build(), Err(BotError::Inconsistency(_))));
    }
}
