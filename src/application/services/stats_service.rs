//! Click statistics service: per-day aggregation and bulk import.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::entities::{ClickDate, ClickStat};
use crate::domain::repositories::ClickStatsRepository;
use crate::error::AppError;

/// Service for querying and importing click statistics.
pub struct StatsService<R: ClickStatsRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ClickStatsRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Aggregates clicks per calendar day within `[start, end]`.
    ///
    /// Covers every code when `vanity` is `None` or blank. Days without
    /// clicks are omitted; the result is sorted ascending by date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `start` is after `end`.
    /// Returns [`AppError::Storage`] on store errors.
    pub async fn click_stats_by_day(
        &self,
        vanity: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClickDate>, AppError> {
        if start > end {
            return Err(AppError::bad_request(
                "Start date must not be after end date",
                json!({ "start": start, "end": end }),
            ));
        }

        let vanity = vanity.map(str::trim).filter(|v| !v.is_empty());
        let stats = self.repository.list(vanity.map(str::to_string)).await?;

        Ok(aggregate_by_day(&stats, start, end))
    }

    /// Upserts imported click rows one by one.
    ///
    /// The first failure aborts the rest of the batch; rows already written
    /// stay written.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered.
    pub async fn import(&self, stats: &[ClickStat]) -> Result<usize, AppError> {
        for stat in stats {
            self.repository.upsert(stat).await?;
        }

        tracing::info!(count = stats.len(), "Click statistics imported");
        Ok(stats.len())
    }

    /// Total number of stored click rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

/// Sums row counts per day, skipping rows outside the range or with a
/// malformed timestamp.
pub fn aggregate_by_day(stats: &[ClickStat], start: NaiveDate, end: NaiveDate) -> Vec<ClickDate> {
    let mut days: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for stat in stats {
        let Some(date) = stat.date() else {
            tracing::warn!(
                vanity = %stat.vanity,
                row_key = %stat.row_key,
                datetime = %stat.datetime,
                "Skipping click record with unparseable timestamp"
            );
            continue;
        };

        if (start..=end).contains(&date) {
            let total = days.entry(date).or_default();
            *total = total.saturating_add(stat.count);
        }
    }

    days.into_iter()
        .map(|(date_clicked, count)| ClickDate {
            date_clicked,
            count,
        })
        .collect()
}
