//! Foundation types shared across the domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{BotError, ValidationError};
pub use ids::{AnnouncementId, CategoryId, UserId};
pub use timestamp::Timestamp;
