//! Announcement content domain - categories and announcements.

mod announcement;
mod category;

pub use announcement::Announcement;
pub use category::Category;
