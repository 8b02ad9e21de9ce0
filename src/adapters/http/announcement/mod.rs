//! Announcement REST endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnnouncementResponse, CreateAnnouncementRequest, ListAnnouncementsQuery,
    UpdateAnnouncementRequest,
};
pub use handlers::AnnouncementHandlers;
pub use routes::announcement_routes;
