//! Bot services and the conversation hub.

mod announcement;
mod hub;
mod service;

pub use announcement::{AnnouncementBotService, AnnouncementCursor, ANNOUNCEMENT_PAGE_SIZE};
pub use hub::{BotHub, EventKind, InboundEvent, TurnStatus};
pub use service::{BotService, ServiceRegistry, TurnRequest, TurnResult};
