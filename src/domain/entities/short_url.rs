//! Short URL entity: a vanity code mapped to a destination and its schedules.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::schedule::{Schedule, resolve_active_url};
use crate::domain::vanity::partition_key;

/// A vanity code and everything stored alongside it.
///
/// `vanity` is the decoded, user-facing code. It is assigned once at
/// creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortUrl {
    pub vanity: String,
    pub url: String,
    pub title: String,
    pub clicks: i64,
    pub is_archived: bool,
    pub created_date: NaiveDate,
    pub created_by: String,
    pub schedules: Vec<Schedule>,
}

impl ShortUrl {
    /// Builds a fresh, unarchived record with zero clicks created today (UTC).
    pub fn new(new: NewShortUrl) -> Self {
        Self {
            vanity: new.vanity,
            url: new.url,
            title: new.title,
            clicks: 0,
            is_archived: false,
            created_date: Utc::now().date_naive(),
            created_by: new.created_by,
            schedules: new.schedules,
        }
    }

    /// Storage partition derived from the vanity code.
    pub fn partition_key(&self) -> String {
        partition_key(&self.vanity)
    }

    /// Destination in effect at `at` after schedule resolution.
    pub fn active_url(&self, at: DateTime<Utc>) -> &str {
        resolve_active_url(&self.url, &self.schedules, at)
    }
}

/// Validated input for creating a short URL.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub vanity: String,
    pub url: String,
    pub title: String,
    pub created_by: String,
    pub schedules: Vec<Schedule>,
}

/// Replacement values applied by an update. Schedules are replaced wholesale.
#[derive(Debug, Clone)]
pub struct ShortUrlUpdate {
    pub url: String,
    pub title: String,
    pub schedules: Vec<Schedule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_short_url(vanity: &str, schedules: Vec<Schedule>) -> ShortUrl {
        ShortUrl::new(NewShortUrl {
            vanity: vanity.to_string(),
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            created_by: "tester".to_string(),
            schedules,
        })
    }

    #[test]
    fn test_new_short_url_defaults() {
        let record = new_short_url("abc", vec![]);

        assert_eq!(record.vanity, "abc");
        assert_eq!(record.clicks, 0);
        assert!(!record.is_archived);
        assert_eq!(record.created_date, Utc::now().date_naive());
        assert_eq!(record.partition_key(), "a");
    }

    #[test]
    fn test_active_url_without_schedules() {
        let record = new_short_url("abc", vec![]);
        assert_eq!(record.active_url(Utc::now()), "https://example.com");
    }

    #[test]
    fn test_active_url_follows_current_schedule() {
        let now = Utc::now();
        let record = new_short_url(
            "abc",
            vec![Schedule::new(
                now - Duration::hours(1),
                now + Duration::hours(1),
                "https://campaign.example.com".to_string(),
            )],
        );

        assert_eq!(record.active_url(now), "https://campaign.example.com");
        assert_eq!(
            record.active_url(now + Duration::hours(2)),
            "https://example.com"
        );
    }
}
