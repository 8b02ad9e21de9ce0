//! HTTP DTOs for announcement endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::announcement::Announcement;

/// Request to create a new announcement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<Uuid>,
}

/// Request to update an announcement; omitted fields stay unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnnouncementRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub categories: Option<Vec<Uuid>>,
}

/// Query parameters for listing announcements.
#[derive(Debug, Clone, Deserialize)]
pub struct ListAnnouncementsQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Announcement view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub valid_until: DateTime<Utc>,
    pub categories: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<&Announcement> for AnnouncementResponse {
    fn from(announcement: &Announcement) -> Self {
        Self {
            id: *announcement.id().as_uuid(),
            title: announcement.title().to_string(),
            content: announcement.content().to_string(),
            valid_until: *announcement.valid_until().as_datetime(),
            categories: announcement
                .categories()
                .iter()
                .map(|id| *id.as_uuid())
                .collect(),
            created_at: *announcement.created_at().as_datetime(),
        }
    }
}
