//! Platform-neutral message model and its lowering to LINE wire messages.

mod formatter;
mod message;
mod outgoing;
pub mod replies;

pub use formatter::{format_messages, FormattedMessages, MAX_BUTTON_LABEL_LEN};
pub use message::{
    Message, MessageBody, MessageKind, MessagingError, QuickReply, CAROUSEL_PAGE_SIZE,
};
pub use outgoing::{
    FlexBubble, FlexBox, FlexComponent, FlexContainer, MessageAction, OutgoingMessage,
    QuickReplyBar, QuickReplyItem,
};
