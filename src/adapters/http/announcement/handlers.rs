//! HTTP handlers for announcement endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::adapters::http::error::{repository_error_response, ErrorResponse};
use crate::domain::announcement::Announcement;
use crate::domain::foundation::{AnnouncementId, CategoryId, Timestamp};
use crate::ports::{AnnouncementRepository, CategoryRepository};

use super::dto::{
    AnnouncementResponse, CreateAnnouncementRequest, ListAnnouncementsQuery,
    UpdateAnnouncementRequest,
};

const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 100;

/// Shared state for the announcement routes.
#[derive(Clone)]
pub struct AnnouncementHandlers {
    announcements: Arc<dyn AnnouncementRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl AnnouncementHandlers {
    pub fn new(
        announcements: Arc<dyn AnnouncementRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            announcements,
            categories,
        }
    }

    /// Rejects references to categories that do not exist, so a typo
    /// surfaces as 400 instead of a foreign-key failure.
    async fn check_categories(&self, ids: &[CategoryId]) -> Result<(), Response> {
        for id in ids {
            match self.categories.find_by_id(id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse::new(format!("unknown category: {}", id))),
                    )
                        .into_response())
                }
                Err(err) => return Err(repository_error_response(err)),
            }
        }
        Ok(())
    }
}

/// GET /api/announcements - List announcements, newest first.
pub async fn list_announcements(
    State(handlers): State<AnnouncementHandlers>,
    Query(query): Query<ListAnnouncementsQuery>,
) -> Response {
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    match handlers.announcements.find_all(per_page, offset).await {
        Ok(announcements) => {
            let body: Vec<AnnouncementResponse> = announcements.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => repository_error_response(err),
    }
}

/// GET /api/announcements/:id - Fetch one announcement.
pub async fn get_announcement(
    State(handlers): State<AnnouncementHandlers>,
    Path(id): Path<Uuid>,
) -> Response {
    let id = AnnouncementId::from_uuid(id);
    match handlers.announcements.find_by_id(&id).await {
        Ok(Some(announcement)) => {
            (StatusCode::OK, Json(AnnouncementResponse::from(&announcement))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("announcement not found: {}", id))),
        )
            .into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// POST /api/announcements - Create an announcement.
pub async fn create_announcement(
    State(handlers): State<AnnouncementHandlers>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Response {
    let categories: Vec<CategoryId> = req.categories.into_iter().map(CategoryId::from_uuid).collect();
    if let Err(response) = handlers.check_categories(&categories).await {
        return response;
    }

    let announcement = match Announcement::new(
        req.title,
        req.content,
        Timestamp::from_datetime(req.valid_until),
        categories,
    ) {
        Ok(announcement) => announcement,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
                .into_response()
        }
    };

    match handlers.announcements.save(&announcement).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(AnnouncementResponse::from(&announcement)),
        )
            .into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// PATCH /api/announcements/:id - Update an announcement.
pub async fn update_announcement(
    State(handlers): State<AnnouncementHandlers>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAnnouncementRequest>,
) -> Response {
    let id = AnnouncementId::from_uuid(id);
    let mut announcement = match handlers.announcements.find_by_id(&id).await {
        Ok(Some(announcement)) => announcement,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("announcement not found: {}", id))),
            )
                .into_response()
        }
        Err(err) => return repository_error_response(err),
    };

    let title = req.title.unwrap_or_else(|| announcement.title().to_string());
    let content = req
        .content
        .unwrap_or_else(|| announcement.content().to_string());
    if let Err(err) = announcement.update_contents(title, content) {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
            .into_response();
    }

    if let Some(valid_until) = req.valid_until {
        announcement.set_valid_until(Timestamp::from_datetime(valid_until));
    }

    if let Some(categories) = req.categories {
        let categories: Vec<CategoryId> =
            categories.into_iter().map(CategoryId::from_uuid).collect();
        if let Err(response) = handlers.check_categories(&categories).await {
            return response;
        }
        announcement.set_categories(categories);
    }

    match handlers.announcements.update(&announcement).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AnnouncementResponse::from(&announcement)),
        )
            .into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// DELETE /api/announcements/:id - Delete an announcement.
pub async fn delete_announcement(
    State(handlers): State<AnnouncementHandlers>,
    Path(id): Path<Uuid>,
) -> Response {
    let id = AnnouncementId::from_uuid(id);
    match handlers.announcements.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => repository_error_response(err),
    }
}
