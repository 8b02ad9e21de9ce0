//! HTTP routes for announcement endpoints.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use super::handlers::{
    create_announcement, delete_announcement, get_announcement, list_announcements,
    update_announcement, AnnouncementHandlers,
};

/// Creates the announcement router with all endpoints.
pub fn announcement_routes(handlers: AnnouncementHandlers) -> Router {
    Router::new()
        .route("/", get(list_announcements))
        .route("/", post(create_announcement))
        .route("/:id", get(get_announcement))
        .route("/:id", patch(update_announcement))
        .route("/:id", delete(delete_announcement))
        .with_state(handlers)
}
