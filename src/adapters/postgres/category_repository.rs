//! PostgreSQL implementation of CategoryRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::announcement::Category;
use crate::domain::foundation::{CategoryId, Timestamp};
use crate::ports::{CategoryRepository, RepositoryError};

use super::map_sqlx_error;

/// PostgreSQL implementation of CategoryRepository.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new PostgresCategoryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_category(row: &sqlx::postgres::PgRow) -> Result<Category, RepositoryError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let announcement_count: i64 = row
        .try_get("announcement_count")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::database(e.to_string()))?;

    Ok(Category::from_parts(
        CategoryId::from_uuid(id),
        name,
        description,
        announcement_count.max(0) as u64,
        Timestamp::from_datetime(created_at),
    ))
}

const SELECT_WITH_COUNT: &str = r#"
    SELECT
        c.id, c.name, c.description, c.created_at,
        COUNT(ac.announcement_id) AS announcement_count
    FROM categories c
    LEFT JOIN announcement_categories ac ON ac.category_id = c.id
"#;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} GROUP BY c.id ORDER BY c.name ASC",
            SELECT_WITH_COUNT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(e.to_string()))?;

        rows.iter().map(row_to_category).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query(&format!(
            "{} WHERE lower(c.name) = lower(trim($1)) GROUP BY c.id",
            SELECT_WITH_COUNT
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(e.to_string()))?;

        row.as_ref().map(row_to_category).transpose()
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query(&format!(
            "{} WHERE c.id = $1 GROUP BY c.id",
            SELECT_WITH_COUNT
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(e.to_string()))?;

        row.as_ref().map(row_to_category).transpose()
    }

    async fn save(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.name())
        .bind(category.description())
        .bind(category.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "name", category.name()))?;

        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.name())
        .bind(category.description())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "name", category.name()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                "category",
                category.id().to_string(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        // association rows go first; no ON DELETE CASCADE on the join table
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        sqlx::query("DELETE FROM announcement_categories WHERE category_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("category", id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        Ok(())
    }
}
