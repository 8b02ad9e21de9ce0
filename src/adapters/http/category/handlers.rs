//! HTTP handlers for category endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::adapters::http::error::{repository_error_response, ErrorResponse};
use crate::domain::announcement::Category;
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryRepository;

use super::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};

/// Shared state for the category routes.
#[derive(Clone)]
pub struct CategoryHandlers {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryHandlers {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }
}

/// GET /api/categories - List all categories.
pub async fn list_categories(State(handlers): State<CategoryHandlers>) -> Response {
    match handlers.repository.find_all().await {
        Ok(categories) => {
            let body: Vec<CategoryResponse> = categories.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => repository_error_response(err),
    }
}

/// GET /api/categories/:id - Fetch one category.
pub async fn get_category(
    State(handlers): State<CategoryHandlers>,
    Path(id): Path<Uuid>,
) -> Response {
    let id = CategoryId::from_uuid(id);
    match handlers.repository.find_by_id(&id).await {
        Ok(Some(category)) => {
            (StatusCode::OK, Json(CategoryResponse::from(&category))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("category not found: {}", id))),
        )
            .into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// POST /api/categories - Create a category.
pub async fn create_category(
    State(handlers): State<CategoryHandlers>,
    Json(req): Json<CreateCategoryRequest>,
) -> Response {
    let category = match Category::new(req.name, req.description) {
        Ok(category) => category,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
                .into_response()
        }
    };

    match handlers.repository.save(&category).await {
        Ok(()) => (StatusCode::CREATED, Json(CategoryResponse::from(&category))).into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// PATCH /api/categories/:id - Update name and/or description.
pub async fn update_category(
    State(handlers): State<CategoryHandlers>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Response {
    let id = CategoryId::from_uuid(id);
    let mut category = match handlers.repository.find_by_id(&id).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("category not found: {}", id))),
            )
                .into_response()
        }
        Err(err) => return repository_error_response(err),
    };

    if let Some(name) = req.name {
        if let Err(err) = category.rename(name) {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
                .into_response();
        }
    }
    if let Some(description) = req.description {
        category.set_description(description);
    }

    match handlers.repository.update(&category).await {
        Ok(()) => (StatusCode::OK, Json(CategoryResponse::from(&category))).into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// DELETE /api/categories/:id - Delete a category.
pub async fn delete_category(
    State(handlers): State<CategoryHandlers>,
    Path(id): Path<Uuid>,
) -> Response {
    let id = CategoryId::from_uuid(id);
    match handlers.repository.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => repository_error_response(err),
    }
}
