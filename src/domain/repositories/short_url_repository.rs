//! Repository trait for short URL records and the code counter.

use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short URL records.
///
/// Implementations receive and return decoded vanity codes; any key encoding
/// the backing store needs is applied inside the implementation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its vanity code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn find(&self, vanity: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the vanity code is already taken.
    /// Returns [`AppError::Storage`] on store errors.
    async fn insert(&self, record: &ShortUrl) -> Result<(), AppError>;

    /// Inserts or fully replaces a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn upsert(&self, record: &ShortUrl) -> Result<(), AppError>;

    /// Deletes a record.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn delete(&self, vanity: &str) -> Result<bool, AppError>;

    /// Lists every record whose archived flag equals `archived`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn list(&self, archived: bool) -> Result<Vec<ShortUrl>, AppError>;

    /// Adds one to a record's click count.
    ///
    /// Returns `Ok(false)` if the record no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn increment_clicks(&self, vanity: &str) -> Result<bool, AppError>;

    /// Atomically increments and returns the code counter.
    ///
    /// The counter starts at 1024, so the first value handed out is 1025.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn next_id(&self) -> Result<i64, AppError>;

    /// Overwrites the code counter (used by bulk import).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn set_next_id(&self, id: i64) -> Result<(), AppError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
