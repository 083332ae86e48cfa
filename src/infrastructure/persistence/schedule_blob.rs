//! Stored representation of redirect schedules.
//!
//! Schedules are kept in a single text column as a JSON array of
//! `{"Start", "End", "AlternativeUrl"}` objects. An empty list is stored as
//! the empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::schedule::Schedule;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StoredSchedule {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    alternative_url: String,
}

impl From<&Schedule> for StoredSchedule {
    fn from(s: &Schedule) -> Self {
        Self {
            start: s.start,
            end: s.end,
            alternative_url: s.alternative_url.clone(),
        }
    }
}

impl From<StoredSchedule> for Schedule {
    fn from(s: StoredSchedule) -> Self {
        Schedule::new(s.start, s.end, s.alternative_url)
    }
}

pub fn encode_schedules(schedules: &[Schedule]) -> Result<String, serde_json::Error> {
    if schedules.is_empty() {
        return Ok(String::new());
    }

    let stored: Vec<StoredSchedule> = schedules.iter().map(StoredSchedule::from).collect();
    serde_json::to_string(&stored)
}

pub fn decode_schedules(raw: &str) -> Result<Vec<Schedule>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let stored: Vec<StoredSchedule> = serde_json::from_str(raw)?;
    Ok(stored.into_iter().map(Schedule::from).collect())
}
