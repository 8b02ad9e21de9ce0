//! PostgreSQL implementations of the content repositories.

mod announcement_repository;
mod category_repository;

pub use announcement_repository::PostgresAnnouncementRepository;
pub use category_repository::PostgresCategoryRepository;

use crate::ports::RepositoryError;

/// Unique-violation SQLSTATE, used to surface duplicates as such.
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn map_sqlx_error(
    err: sqlx::Error,
    duplicate_field: &'static str,
    value: &str,
) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return RepositoryError::duplicate(duplicate_field, value);
        }
    }
    RepositoryError::database(err.to_string())
}
