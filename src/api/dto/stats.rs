//! DTOs for click statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ClickDate;

/// Request body for `POST /api/stats/by-day`.
///
/// Without `vanity` (or with a blank one), clicks of every code are counted.
#[derive(Debug, Deserialize, Validate)]
pub struct ClickStatsRequest {
    #[validate(length(max = 200))]
    pub vanity: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Clicks on one day.
#[derive(Debug, Serialize)]
pub struct ClickDateItem {
    pub date_clicked: NaiveDate,
    pub count: i64,
}

impl From<ClickDate> for ClickDateItem {
    fn from(d: ClickDate) -> Self {
        Self {
            date_clicked: d.date_clicked,
            count: d.count,
        }
    }
}

/// Per-day click counts, ascending by date.
#[derive(Debug, Serialize)]
pub struct ClickDateListResponse {
    pub url: String,
    pub items: Vec<ClickDateItem>,
}
