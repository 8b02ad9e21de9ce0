//! Platform-neutral outgoing message model.
//!
//! Invariants are enforced at construction: a violation here is a fatal
//! programming error surfaced immediately, never a deferred formatting
//! failure.

use thiserror::Error;

/// Maximum number of bubbles in one carousel, matching the bot's page size.
pub const CAROUSEL_PAGE_SIZE: usize = 10;

/// Errors raised by message construction or formatting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagingError {
    #[error("Cannot format an empty message sequence")]
    EmptySequence,

    #[error("A buttons message requires at least one button")]
    NoButtons,

    #[error("A carousel holds between 1 and {max} items, got {actual}")]
    CarouselOutOfBounds { max: usize, actual: usize },

    #[error("A carousel body must be homogeneous, found a non-bubble item")]
    NonHomogeneousCarousel,

    #[error("A basic message holds exactly one text body")]
    MalformedBasic,

    #[error("A buttons message body holds only text and button items")]
    MalformedButtons,
}

/// A suggested quick reply shown alongside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReply {
    pub label: String,
    /// Machine payload sent back verbatim when the suggestion is tapped.
    pub text: String,
}

impl QuickReply {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// The kind of a message, driving how its body is lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Basic,
    Buttons,
    Carousel,
}

/// One element of a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Plain text.
    Text { text: String },
    /// An interactive button; `text` is the machine payload and survives
    /// label truncation intact.
    Button { label: String, text: String },
    /// One carousel item: optional header plus body text.
    Bubble {
        header: Option<String>,
        text: String,
    },
}

/// A single outgoing message before lowering to the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    body: Vec<MessageBody>,
    quick_replies: Vec<QuickReply>,
}

impl Message {
    /// Creates a plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Basic,
            body: vec![MessageBody::Text { text: text.into() }],
            quick_replies: Vec::new(),
        }
    }

    /// Creates a buttons message: an optional lead text followed by at
    /// least one button.
    pub fn buttons(
        lead: Option<String>,
        buttons: Vec<(String, String)>,
    ) -> Result<Self, MessagingError> {
        if buttons.is_empty() {
            return Err(MessagingError::NoButtons);
        }

        let mut body = Vec::with_capacity(buttons.len() + 1);
        if let Some(text) = lead {
            body.push(MessageBody::Text { text });
        }
        body.extend(
            buttons
                .into_iter()
                .map(|(label, text)| MessageBody::Button { label, text }),
        );

        Ok(Self {
            kind: MessageKind::Buttons,
            body,
            quick_replies: Vec::new(),
        })
    }

    /// Creates a carousel of up to [`CAROUSEL_PAGE_SIZE`] bubbles.
    pub fn carousel(
        items: Vec<(Option<String>, String)>,
    ) -> Result<Self, MessagingError> {
        if items.is_empty() || items.len() > CAROUSEL_PAGE_SIZE {
            return Err(MessagingError::CarouselOutOfBounds {
                max: CAROUSEL_PAGE_SIZE,
                actual: items.len(),
            });
        }

        Ok(Self {
            kind: MessageKind::Carousel,
            body: items
                .into_iter()
                .map(|(header, text)| MessageBody::Bubble { header, text })
                .collect(),
            quick_replies: Vec::new(),
        })
    }

    /// Attaches quick reply suggestions.
    pub fn with_quick_replies(mut self, quick_replies: Vec<QuickReply>) -> Self {
        self.quick_replies = quick_replies;
        self
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn body(&self) -> &[MessageBody] {
        &self.body
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_require_at_least_one_button() {
        let err = Message::buttons(Some("pick one".into()), vec![]).unwrap_err();
        assert_eq!(err, MessagingError::NoButtons);
    }

    #[test]
    fn carousel_rejects_empty_and_oversized_inputs() {
        assert!(matches!(
            Message::carousel(vec![]),
            Err(MessagingError::CarouselOutOfBounds { actual: 0, .. })
        ));

        let too_many = (0..CAROUSEL_PAGE_SIZE + 1)
            .map(|i| (None, format!("item {}", i)))
            .collect();
        assert!(matches!(
            Message::carousel(too_many),
            Err(MessagingError::CarouselOutOfBounds { actual: 11, .. })
        ));
    }

    #[test]
    fn carousel_accepts_up_to_page_size() {
        let items = (0..CAROUSEL_PAGE_SIZE)
            .map(|i| (Some(format!("title {}", i)), "body".to_string()))
            .collect();
        let message = Message::carousel(items).unwrap();
        assert_eq!(message.body().len(), CAROUSEL_PAGE_SIZE);
        assert_eq!(message.kind(), MessageKind::Carousel);
    }

    #[test]
    fn lead_text_precedes_buttons() {
        let message = Message::buttons(
            Some("continue?".into()),
            vec![("Yes".into(), "yes".into())],
        )
        .unwrap();

        assert!(matches!(message.body()[0], MessageBody::Text { .. }));
        assert!(matches!(message.body()[1], MessageBody::Button { .. }));
    }
}
