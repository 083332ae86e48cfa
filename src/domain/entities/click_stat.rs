//! Click statistics entities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Timestamp layout used for stored click records.
pub const CLICK_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One stored click-statistics row.
///
/// `vanity` is the decoded code the click belongs to; `row_key` is unique
/// within that code. `datetime` keeps the stored `YYYY-MM-DD HH:MM` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickStat {
    pub vanity: String,
    pub row_key: String,
    pub datetime: String,
    pub count: i64,
}

impl ClickStat {
    /// A single click on `vanity` at `at`, with a fresh row key.
    pub fn new_click(vanity: String, at: DateTime<Utc>) -> Self {
        Self {
            vanity,
            row_key: uuid::Uuid::new_v4().to_string(),
            datetime: at.format(CLICK_DATETIME_FORMAT).to_string(),
            count: 1,
        }
    }

    /// Calendar day of the click, or `None` if the stored text is malformed.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDateTime::parse_from_str(&self.datetime, CLICK_DATETIME_FORMAT)
            .map(|dt| dt.date())
            .ok()
    }
}

/// Clicks aggregated for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickDate {
    pub date_clicked: NaiveDate,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_click_formats_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
        let click = ClickStat::new_click("abc".to_string(), at);

        assert_eq!(click.vanity, "abc");
        assert_eq!(click.datetime, "2024-03-09 14:05");
        assert_eq!(click.count, 1);
        assert!(!click.row_key.is_empty());
    }

    #[test]
    fn test_new_clicks_get_distinct_row_keys() {
        let at = Utc::now();
        let a = ClickStat::new_click("abc".to_string(), at);
        let b = ClickStat::new_click("abc".to_string(), at);
        assert_ne!(a.row_key, b.row_key);
    }

    #[test]
    fn test_date_parses_stored_text() {
        let click = ClickStat {
            vanity: "abc".to_string(),
            row_key: "r1".to_string(),
            datetime: "2023-12-31 23:59".to_string(),
            count: 1,
        };
        assert_eq!(click.date(), NaiveDate::from_ymd_opt(2023, 12, 31));
    }

    #[test]
    fn test_date_malformed_text() {
        let click = ClickStat {
            vanity: "abc".to_string(),
            row_key: "r1".to_string(),
            datetime: "yesterday".to_string(),
            count: 1,
        };
        assert_eq!(click.date(), None);
    }
}
