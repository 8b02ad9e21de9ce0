//! HTTP DTOs for category endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::announcement::Category;

/// Request to create a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request to update a category; omitted fields stay unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Category view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub announcement_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: *category.id().as_uuid(),
            name: category.name().to_string(),
            description: category.description().to_string(),
            announcement_count: category.announcement_count(),
            created_at: *category.created_at().as_datetime(),
        }
    }
}
