//! Category repository port.

use async_trait::async_trait;

use crate::domain::announcement::Category;
use crate::domain::foundation::CategoryId;

use super::RepositoryError;

/// Repository port for categories.
///
/// `find_all` and `find_by_name` serve the bot; the remaining operations
/// back the CRUD REST API.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns every category, ordered by name, with announcement counts.
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Finds a category by name.
    ///
    /// Matching is case-insensitive and whitespace-trimmed, since the name
    /// arrives as free-form chat text. Returns `None` when unknown.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError>;

    /// Finds a category by id. Returns `None` when unknown.
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError>;

    /// Persists a new category.
    ///
    /// # Errors
    ///
    /// - `Duplicate` when the name is already taken
    /// - `Database` on persistence failure
    async fn save(&self, category: &Category) -> Result<(), RepositoryError>;

    /// Updates an existing category.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the category does not exist
    /// - `Duplicate` when renaming onto a taken name
    async fn update(&self, category: &Category) -> Result<(), RepositoryError>;

    /// Deletes a category and its announcement associations.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the category does not exist
    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CategoryRepository) {}
    }
}
