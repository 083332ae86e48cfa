//! Time-bounded redirect overrides and active-URL resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::url_validator::validate_http_url;

/// A window during which a short URL redirects to an alternative destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub alternative_url: String,
}

/// Reasons a schedule is rejected at input validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Schedule end ({end}) must be after its start ({start})")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Schedule alternative URL is invalid: {0}")]
    InvalidUrl(String),
}

impl Schedule {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, alternative_url: String) -> Self {
        Self {
            start,
            end,
            alternative_url,
        }
    }

    /// Whether `at` falls strictly inside the window. Boundary instants are
    /// outside, and a window with `end <= start` is never active.
    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        self.start < at && at < self.end
    }

    /// Checks the window ordering and the alternative URL.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.end <= self.start {
            return Err(ScheduleError::EmptyWindow {
                start: self.start,
                end: self.end,
            });
        }

        validate_http_url(&self.alternative_url)
            .map(|_| ())
            .map_err(|e| ScheduleError::InvalidUrl(e.to_string()))
    }
}

/// Picks the destination in effect at `at`.
///
/// Among schedules active at `at`, the one with the earliest `start` wins.
/// Equal starts keep their stored order (stable sort), so the schedule listed
/// first wins the tie. Falls back to `base_url` when nothing is active.
pub fn resolve_active_url<'a>(
    base_url: &'a str,
    schedules: &'a [Schedule],
    at: DateTime<Utc>,
) -> &'a str {
    // min_by_key returns the first of several equal minima
    schedules
        .iter()
        .filter(|s| s.is_active(at))
        .min_by_key(|s| s.start)
        .map(|s| s.alternative_url.as_str())
        .unwrap_or(base_url)
}

/// Validates every schedule in a request, reporting the first offending index.
pub fn validate_schedules(schedules: &[Schedule]) -> Result<(), (usize, ScheduleError)> {
    schedules
        .iter()
        .enumerate()
        .try_for_each(|(i, s)| s.validate().map_err(|e| (i, e)))
}
