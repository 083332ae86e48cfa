//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// A redirect that still has to be counted.
///
/// Created by the redirect handler and sent over a bounded channel to
/// [`crate::domain::click_worker::run_click_worker`], so the redirect response
/// never waits on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub vanity: String,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event for `vanity` at `clicked_at`.
    pub fn new(vanity: String, clicked_at: DateTime<Utc>) -> Self {
        Self { vanity, clicked_at }
    }
}
