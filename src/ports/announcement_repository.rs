//! Announcement repository port.

use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::domain::foundation::{AnnouncementId, CategoryId, Timestamp};

use super::RepositoryError;

/// Paging and expiry criteria for bot-facing announcement queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncementQuery {
    pub limit: u32,
    pub offset: u32,
    /// Announcements whose `valid_until` precedes this instant are
    /// excluded. Carries the triggering event's timestamp so repeated
    /// deliveries of one event see the same page.
    pub not_expired_as_of: Timestamp,
}

impl AnnouncementQuery {
    /// Builds the query for a 1-based page of the given size.
    pub fn page(page: u32, page_size: u32, not_expired_as_of: Timestamp) -> Self {
        Self {
            limit: page_size,
            offset: page.saturating_sub(1) * page_size,
            not_expired_as_of,
        }
    }
}

/// Repository port for announcements.
///
/// Implementations must return a stable order for a given
/// `{category, page}` pair (`valid_until` ascending, then id) so that
/// pagination is sound across repeated calls.
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Returns the page of non-expired announcements in a category.
    async fn find_by_category(
        &self,
        category: &CategoryId,
        query: AnnouncementQuery,
    ) -> Result<Vec<Announcement>, RepositoryError>;

    /// Returns announcements for the management API, newest first.
    async fn find_all(&self, limit: u32, offset: u32)
        -> Result<Vec<Announcement>, RepositoryError>;

    /// Finds an announcement by id. Returns `None` when unknown.
    async fn find_by_id(
        &self,
        id: &AnnouncementId,
    ) -> Result<Option<Announcement>, RepositoryError>;

    /// Persists a new announcement and its category links.
    ///
    /// # Errors
    ///
    /// - `Duplicate` when the title is already taken
    /// - `Database` on persistence failure
    async fn save(&self, announcement: &Announcement) -> Result<(), RepositoryError>;

    /// Updates an existing announcement, replacing its category links.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the announcement does not exist
    async fn update(&self, announcement: &Announcement) -> Result<(), RepositoryError>;

    /// Deletes an announcement.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the announcement does not exist
    async fn delete(&self, id: &AnnouncementId) -> Result<(), RepositoryError>;
}
