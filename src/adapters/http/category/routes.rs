//! HTTP routes for category endpoints.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use super::handlers::{
    create_category, delete_category, get_category, list_categories, update_category,
    CategoryHandlers,
};

/// Creates the category router with all endpoints.
pub fn category_routes(handlers: CategoryHandlers) -> Router {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/:id", get(get_category))
        .route("/:id", patch(update_category))
        .route("/:id", delete(delete_category))
        .with_state(handlers)
}
