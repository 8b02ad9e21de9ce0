//! Category REST endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
pub use handlers::CategoryHandlers;
pub use routes::category_routes;
