//! Category entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, Timestamp, ValidationError};

/// An announcement category.
///
/// The name is the user-facing identifier: bot users select categories by
/// typing (or tapping) the name, so names are unique and matched
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    /// Number of announcements currently tagged with this category.
    /// Derived by the repository, not stored on the row.
    announcement_count: u64,
    created_at: Timestamp,
}

impl Category {
    /// Creates a new category.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: CategoryId::new(),
            name,
            description: description.into(),
            announcement_count: 0,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstructs a category from persisted fields.
    pub fn from_parts(
        id: CategoryId,
        name: String,
        description: String,
        announcement_count: u64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            announcement_count,
            created_at,
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn announcement_count(&self) -> u64 {
        self.announcement_count
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Renames the category.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_starts_with_zero_announcements() {
        let category = Category::new("Akademik", "Pengumuman akademik").unwrap();
        assert_eq!(category.announcement_count(), 0);
        assert_eq!(category.name(), "Akademik");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(Category::new("  ", "desc").is_err());
    }

    #[test]
    fn rename_rejects_empty_name() {
        let mut category = Category::new("Beasiswa", "").unwrap();
        assert!(category.rename("").is_err());
        assert!(category.rename("Lomba").is_ok());
        assert_eq!(category.name(), "Lomba");
    }
}
