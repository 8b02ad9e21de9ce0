//! Lowering from the message model to transport messages.

use super::message::{Message, MessageBody, MessageKind, MessagingError, QuickReply};
use super::outgoing::{
    FlexBox, FlexBubble, FlexCarousel, FlexComponent, FlexContainer, OutgoingMessage,
    QuickReplyBar, QuickReplyItem,
};

/// Display labels longer than this are silently truncated; the machine
/// payload behind the button is never touched.
pub const MAX_BUTTON_LABEL_LEN: usize = 20;

/// The transport shape of a formatted turn.
///
/// Exactly one input message lowers to `Single` and is sent over the
/// reply transport (single-use token); more than one lowers to `Batch`
/// and is sent over the push transport (durable recipient id). This
/// length-based branch is the sole determinant of reply vs. push.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedMessages {
    Single(OutgoingMessage),
    Batch(Vec<OutgoingMessage>),
}

/// Lowers a message sequence into transport messages.
///
/// # Errors
///
/// Fails on an empty sequence or on a structurally broken message (a
/// carousel holding non-bubble bodies); both are internal errors, never
/// user-correctable ones.
pub fn format_messages(messages: &[Message]) -> Result<FormattedMessages, MessagingError> {
    match messages {
        [] => Err(MessagingError::EmptySequence),
        [single] => Ok(FormattedMessages::Single(lower_message(single)?)),
        many => Ok(FormattedMessages::Batch(
            many.iter().map(lower_message).collect::<Result<_, _>>()?,
        )),
    }
}

fn lower_message(message: &Message) -> Result<OutgoingMessage, MessagingError> {
    let lowered = match message.kind() {
        MessageKind::Basic => lower_basic(message)?,
        MessageKind::Buttons => lower_buttons(message)?,
        MessageKind::Carousel => lower_carousel(message)?,
    };

    Ok(match quick_reply_bar(message.quick_replies()) {
        Some(bar) => lowered.with_quick_reply(bar),
        None => lowered,
    })
}

fn lower_basic(message: &Message) -> Result<OutgoingMessage, MessagingError> {
    match message.body() {
        [MessageBody::Text { text }] => Ok(OutgoingMessage::text(text.clone())),
        _ => Err(MessagingError::MalformedBasic),
    }
}

fn lower_buttons(message: &Message) -> Result<OutgoingMessage, MessagingError> {
    let mut components = Vec::new();
    let mut alt_text: Option<&str> = None;

    for body in message.body() {
        match body {
            MessageBody::Text { text } => {
                alt_text.get_or_insert(text);
                components.push(FlexComponent::text(text.clone(), "sm", false, false));
                components.push(FlexComponent::separator());
            }
            MessageBody::Button { label, text } => {
                alt_text.get_or_insert(label);
                components.push(FlexComponent::button(truncate_label(label), text.clone()));
            }
            MessageBody::Bubble { .. } => return Err(MessagingError::MalformedButtons),
        }
    }

    let bubble = FlexBubble::new(FlexBox::vertical(components, true), None, true);
    Ok(OutgoingMessage::flex(
        alt_text.unwrap_or_default(),
        FlexContainer::Bubble(bubble),
    ))
}

fn lower_carousel(message: &Message) -> Result<OutgoingMessage, MessagingError> {
    let mut bubbles = Vec::with_capacity(message.body().len());
    let mut alt_text: Option<&str> = None;

    for body in message.body() {
        match body {
            MessageBody::Bubble { header, text } => {
                alt_text.get_or_insert(header.as_deref().unwrap_or(text));
                let header_box = header.as_ref().map(|title| {
                    FlexBox::vertical(
                        vec![FlexComponent::text(title.clone(), "lg", true, true)],
                        true,
                    )
                });
                let body_box = FlexBox::vertical(
                    vec![FlexComponent::text(text.clone(), "sm", false, false)],
                    true,
                );
                bubbles.push(FlexBubble::new(body_box, header_box, false));
            }
            _ => return Err(MessagingError::NonHomogeneousCarousel),
        }
    }

    Ok(OutgoingMessage::flex(
        alt_text.unwrap_or_default(),
        FlexContainer::Carousel(FlexCarousel::new(bubbles)),
    ))
}

fn quick_reply_bar(quick_replies: &[QuickReply]) -> Option<QuickReplyBar> {
    if quick_replies.is_empty() {
        return None;
    }
    Some(QuickReplyBar {
        items: quick_replies
            .iter()
            .map(|reply| QuickReplyItem::new(truncate_label(&reply.label), reply.text.clone()))
            .collect(),
    })
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_BUTTON_LABEL_LEN {
        return label.to_string();
    }
    label.chars().take(MAX_BUTTON_LABEL_LEN).collect()
}
