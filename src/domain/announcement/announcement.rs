//! Announcement entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnnouncementId, CategoryId, Timestamp, ValidationError};

/// A single announcement.
///
/// Titles are unique across the store and used for management lookups.
/// An announcement belongs to any number of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    id: AnnouncementId,
    title: String,
    content: String,
    /// The announcement disappears from bot-facing listings once this
    /// instant precedes the triggering event's timestamp.
    valid_until: Timestamp,
    categories: Vec<CategoryId>,
    created_at: Timestamp,
}

impl Announcement {
    /// Creates a new announcement.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        valid_until: Timestamp,
        categories: Vec<CategoryId>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        Ok(Self {
            id: AnnouncementId::new(),
            title,
            content,
            valid_until,
            categories,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstructs an announcement from persisted fields.
    pub fn from_parts(
        id: AnnouncementId,
        title: String,
        content: String,
        valid_until: Timestamp,
        categories: Vec<CategoryId>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            content,
            valid_until,
            categories,
            created_at,
        }
    }

    pub fn id(&self) -> AnnouncementId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn valid_until(&self) -> Timestamp {
        self.valid_until
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns `true` when the announcement is expired as of `at`.
    pub fn is_expired_at(&self, at: Timestamp) -> bool {
        self.valid_until < at
    }

    /// Replaces title and content.
    pub fn update_contents(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        self.title = title;
        self.content = content;
        Ok(())
    }

    /// Extends or shortens the validity window.
    pub fn set_valid_until(&mut self, valid_until: Timestamp) {
        self.valid_until = valid_until;
    }

    /// Replaces the category set.
    pub fn set_categories(&mut self, categories: Vec<CategoryId>) {
        self.categories = categories;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Announcement {
        Announcement::new(
            "Pendaftaran Wisuda",
            "Pendaftaran wisuda periode April telah dibuka.",
            Timestamp::from_millis(2_000),
            vec![CategoryId::new()],
        )
        .unwrap()
    }

    #[test]
    fn expiry_is_relative_to_event_timestamp() {
        let announcement = sample();
        assert!(!announcement.is_expired_at(Timestamp::from_millis(1_999)));
        assert!(!announcement.is_expired_at(Timestamp::from_millis(2_000)));
        assert!(announcement.is_expired_at(Timestamp::from_millis(2_001)));
    }

    #[test]
    fn blank_title_or_content_is_rejected() {
        let valid_until = Timestamp::from_millis(0);
        assert!(Announcement::new("", "body", valid_until, vec![]).is_err());
        assert!(Announcement::new("title", " ", valid_until, vec![]).is_err());
    }
}
