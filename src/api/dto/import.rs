//! DTOs for bulk import, shared by the API and the admin CLI.
//!
//! Numeric fields accept either JSON numbers or numeric strings, since
//! exported data often carries both.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use super::urls::ScheduleDto;
use crate::domain::entities::{ClickStat, ShortUrl};
use crate::domain::schedule::Schedule;

/// Request body for `POST /api/import/urls`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ImportUrlsRequest {
    #[validate(nested)]
    pub items: Vec<ImportUrlItem>,

    /// Value to set the code counter to after the records are written.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub next_id: Option<i64>,
}

/// One short URL record to import as-is.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ImportUrlItem {
    #[validate(length(min = 1, message = "Vanity is required"))]
    pub vanity: String,

    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    #[validate(range(min = 0))]
    pub clicks: i64,

    #[serde(default)]
    pub is_archived: bool,

    pub created_date: Option<NaiveDate>,

    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    pub schedules: Vec<ScheduleDto>,
}

impl From<ImportUrlItem> for ShortUrl {
    fn from(item: ImportUrlItem) -> Self {
        ShortUrl {
            vanity: item.vanity,
            url: item.url,
            title: item.title,
            clicks: item.clicks,
            is_archived: item.is_archived,
            created_date: item
                .created_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            created_by: item.created_by,
            schedules: item.schedules.into_iter().map(Schedule::from).collect(),
        }
    }
}

/// Request body for `POST /api/import/clicks`.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportClicksRequest {
    #[validate(nested)]
    pub items: Vec<ImportClickItem>,
}

/// One click-statistics row to import.
///
/// `datetime` is stored verbatim; rows that do not parse as
/// `YYYY-MM-DD HH:MM` are skipped later by the per-day report.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ImportClickItem {
    #[validate(length(min = 1, message = "Vanity is required"))]
    pub vanity: String,

    /// Row key; a fresh one is generated when absent.
    pub row_key: Option<String>,

    pub datetime: String,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default = "default_count")]
    #[validate(range(min = 0))]
    pub count: i64,
}

fn default_count() -> i64 {
    1
}

impl From<ImportClickItem> for ClickStat {
    fn from(item: ImportClickItem) -> Self {
        ClickStat {
            vanity: item.vanity,
            row_key: item
                .row_key
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            datetime: item.datetime,
            count: item.count,
        }
    }
}

/// Result of an import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strings_accepted() {
        let req: ImportUrlsRequest = serde_json::from_value(serde_json::json!({
            "items": [{ "vanity": "a", "url": "https://example.com", "clicks": "12" }],
            "next_id": "4000"
        }))
        .unwrap();

        assert_eq!(req.next_id, Some(4000));
        assert_eq!(req.items[0].clicks, 12);
    }

    #[test]
    fn test_url_item_defaults() {
        let item: ImportUrlItem = serde_json::from_value(serde_json::json!({
            "vanity": "a", "url": "https://example.com"
        }))
        .unwrap();

        let record = ShortUrl::from(item);
        assert_eq!(record.clicks, 0);
        assert!(!record.is_archived);
        assert!(record.schedules.is_empty());
        assert_eq!(record.created_date, Utc::now().date_naive());
    }

    #[test]
    fn test_click_item_defaults() {
        let item: ImportClickItem = serde_json::from_value(serde_json::json!({
            "vanity": "a", "datetime": "2024-01-01 10:00"
        }))
        .unwrap();

        let stat = ClickStat::from(item);
        assert_eq!(stat.count, 1);
        assert!(!stat.row_key.is_empty());
    }

    #[test]
    fn test_negative_clicks_rejected() {
        let req: ImportUrlsRequest = serde_json::from_value(serde_json::json!({
            "items": [{ "vanity": "a", "url": "https://example.com", "clicks": -1 }]
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
