//! PostgreSQL implementation of AnnouncementRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::announcement::Announcement;
use crate::domain::foundation::{AnnouncementId, CategoryId, Timestamp};
use crate::ports::{AnnouncementQuery, AnnouncementRepository, RepositoryError};

use super::map_sqlx_error;

/// PostgreSQL implementation of AnnouncementRepository.
///
/// Bot-facing queries order by `valid_until ASC, id ASC`: soonest-expiring
/// first, ties broken deterministically, so a `{category, page}` pair is
/// stable across repeated calls.
#[derive(Clone)]
pub struct PostgresAnnouncementRepository {
    pool: PgPool,
}

impl PostgresAnnouncementRepository {
    /// Creates a new PostgresAnnouncementRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_announcement(row: &sqlx::postgres::PgRow) -> Result<Announcement, RepositoryError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let valid_until: chrono::DateTime<chrono::Utc> = row
        .try_get("valid_until")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::database(e.to_string()))?;
    let category_ids: Vec<Uuid> = row
        .try_get("category_ids")
        .map_err(|e| RepositoryError::database(e.to_string()))?;

    Ok(Announcement::from_parts(
        AnnouncementId::from_uuid(id),
        title,
        content,
        Timestamp::from_datetime(valid_until),
        category_ids.into_iter().map(CategoryId::from_uuid).collect(),
        Timestamp::from_datetime(created_at),
    ))
}

const SELECT_WITH_CATEGORIES: &str = r#"
    SELECT
        a.id, a.title, a.content, a.valid_until, a.created_at,
        COALESCE(
            array_agg(ac.category_id) FILTER (WHERE ac.category_id IS NOT NULL),
            '{}'
        ) AS category_ids
    FROM announcements a
    LEFT JOIN announcement_categories ac ON ac.announcement_id = a.id
"#;

#[async_trait]
impl AnnouncementRepository for PostgresAnnouncementRepository {
    async fn find_by_category(
        &self,
        category: &CategoryId,
        query: AnnouncementQuery,
    ) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE a.id IN (
                SELECT announcement_id FROM announcement_categories
                WHERE category_id = $1
            )
            AND a.valid_until >= $2
            GROUP BY a.id
            ORDER BY a.valid_until ASC, a.id ASC
            LIMIT $3 OFFSET $4
            "#,
            SELECT_WITH_CATEGORIES
        ))
        .bind(category.as_uuid())
        .bind(query.not_expired_as_of.as_datetime())
        .bind(i64::from(query.limit))
        .bind(i64::from(query.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(e.to_string()))?;

        rows.iter().map(row_to_announcement).collect()
    }

    async fn find_all(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"{}
            GROUP BY a.id
            ORDER BY a.created_at DESC, a.id ASC
            LIMIT $1 OFFSET $2
            "#,
            SELECT_WITH_CATEGORIES
        ))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(e.to_string()))?;

        rows.iter().map(row_to_announcement).collect()
    }

    async fn find_by_id(
        &self,
        id: &AnnouncementId,
    ) -> Result<Option<Announcement>, RepositoryError> {
        let row = sqlx::query(&format!(
            "{} WHERE a.id = $1 GROUP BY a.id",
            SELECT_WITH_CATEGORIES
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(e.to_string()))?;

        row.as_ref().map(row_to_announcement).transpose()
    }

    async fn save(&self, announcement: &Announcement) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO announcements (id, title, content, valid_until, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(announcement.id().as_uuid())
        .bind(announcement.title())
        .bind(announcement.content())
        .bind(announcement.valid_until().as_datetime())
        .bind(announcement.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, "title", announcement.title()))?;

        for category_id in announcement.categories() {
            sqlx::query(
                r#"
                INSERT INTO announcement_categories (announcement_id, category_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(announcement.id().as_uuid())
            .bind(category_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, announcement: &Announcement) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE announcements SET title = $2, content = $3, valid_until = $4
            WHERE id = $1
            "#,
        )
        .bind(announcement.id().as_uuid())
        .bind(announcement.title())
        .bind(announcement.content())
        .bind(announcement.valid_until().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, "title", announcement.title()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                "announcement",
                announcement.id().to_string(),
            ));
        }

        sqlx::query("DELETE FROM announcement_categories WHERE announcement_id = $1")
            .bind(announcement.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        for category_id in announcement.categories() {
            sqlx::query(
                r#"
                INSERT INTO announcement_categories (announcement_id, category_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(announcement.id().as_uuid())
            .bind(category_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &AnnouncementId) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        sqlx::query("DELETE FROM announcement_categories WHERE announcement_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("announcement", id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::database(e.to_string()))?;

        Ok(())
    }
}
