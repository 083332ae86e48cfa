//! Repository trait for click statistics.

use crate::domain::entities::ClickStat;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click-statistics rows.
///
/// Rows are append-only: they are recorded by click tracking or bulk import
/// and afterwards only queried.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickStatsRepository: Send + Sync {
    /// Appends a click-statistics row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn record(&self, stat: &ClickStat) -> Result<(), AppError>;

    /// Inserts or replaces a row keyed by `(vanity, row_key)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn upsert(&self, stat: &ClickStat) -> Result<(), AppError>;

    /// Lists rows for one vanity code, or for every code when `vanity` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn list(&self, vanity: Option<String>) -> Result<Vec<ClickStat>, AppError>;

    /// Counts all stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    async fn count(&self) -> Result<i64, AppError>;
}
