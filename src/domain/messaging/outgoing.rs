//! Lowered wire-level message primitives.
//!
//! These serialize directly into LINE Messaging API payloads (text messages
//! and Flex containers). The conversational core only produces them through
//! [`super::format_messages`]; the LINE adapter serializes them as-is.

use serde::Serialize;

/// A message in its transport shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Text {
        text: String,
        #[serde(rename = "quickReply", skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReplyBar>,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: FlexContainer,
        #[serde(rename = "quickReply", skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReplyBar>,
    },
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutgoingMessage::Text {
            text: text.into(),
            quick_reply: None,
        }
    }

    pub fn flex(alt_text: impl Into<String>, contents: FlexContainer) -> Self {
        OutgoingMessage::Flex {
            alt_text: alt_text.into(),
            contents,
            quick_reply: None,
        }
    }

    /// Attaches a quick reply bar to any message shape.
    pub fn with_quick_reply(mut self, bar: QuickReplyBar) -> Self {
        match &mut self {
            OutgoingMessage::Text { quick_reply, .. }
            | OutgoingMessage::Flex { quick_reply, .. } => *quick_reply = Some(bar),
        }
        self
    }
}

/// Quick reply bar attached below a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReplyBar {
    pub items: Vec<QuickReplyItem>,
}

/// One tappable quick reply suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReplyItem {
    #[serde(rename = "type")]
    kind: &'static str,
    pub action: MessageAction,
}

impl QuickReplyItem {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: "action",
            action: MessageAction::new(label, text),
        }
    }
}

/// A message action: tapping it sends `text` back as the user's message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageAction {
    #[serde(rename = "type")]
    kind: &'static str,
    pub label: String,
    pub text: String,
}

impl MessageAction {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: "message",
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Top-level Flex content: one bubble or a carousel of bubbles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexContainer {
    Bubble(FlexBubble),
    Carousel(FlexCarousel),
}

/// A horizontally paged set of bubbles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexCarousel {
    #[serde(rename = "type")]
    kind: &'static str,
    pub contents: Vec<FlexBubble>,
}

impl FlexCarousel {
    pub fn new(contents: Vec<FlexBubble>) -> Self {
        Self {
            kind: "carousel",
            contents,
        }
    }
}

/// One bounded item container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexBubble {
    #[serde(rename = "type")]
    kind: &'static str,
    pub size: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<FlexBox>,
    pub body: FlexBox,
}

impl FlexBubble {
    pub fn new(body: FlexBox, header: Option<FlexBox>, small: bool) -> Self {
        Self {
            kind: "bubble",
            size: if small { "kilo" } else { "mega" },
            header,
            body,
        }
    }
}

/// A vertical box of components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexBox {
    #[serde(rename = "type")]
    kind: &'static str,
    pub layout: &'static str,
    #[serde(rename = "paddingAll", skip_serializing_if = "Option::is_none")]
    pub padding_all: Option<&'static str>,
    pub contents: Vec<FlexComponent>,
}

impl FlexBox {
    pub fn vertical(contents: Vec<FlexComponent>, tight_padding: bool) -> Self {
        Self {
            kind: "box",
            layout: "vertical",
            padding_all: tight_padding.then_some("lg"),
            contents,
        }
    }
}

/// Leaf Flex components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexComponent {
    Text {
        text: String,
        size: &'static str,
        wrap: bool,
        weight: &'static str,
        align: &'static str,
    },
    Button {
        action: MessageAction,
        height: &'static str,
    },
    Separator {
        margin: &'static str,
    },
}

impl FlexComponent {
    pub fn text(text: impl Into<String>, size: &'static str, bold: bool, center: bool) -> Self {
        FlexComponent::Text {
            text: text.into(),
            size,
            wrap: true,
            weight: if bold { "bold" } else { "regular" },
            align: if center { "center" } else { "start" },
        }
    }

    pub fn button(label: impl Into<String>, text: impl Into<String>) -> Self {
        FlexComponent::Button {
            action: MessageAction::new(label, text),
            height: "sm",
        }
    }

    pub fn separator() -> Self {
        FlexComponent::Separator { margin: "lg" }
    }
}
