//! HTTP adapters - REST API implementations.
//!
//! The content store is managed over plain CRUD endpoints, separate from
//! the bot webhook.

pub mod announcement;
pub mod category;

mod error;

pub use announcement::{announcement_routes, AnnouncementHandlers};
pub use category::{category_routes, CategoryHandlers};
pub use error::ErrorResponse;
