//! DTOs for short URL management endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{CreateShortUrl, ShortUrlView};
use crate::domain::entities::ShortUrlUpdate;
use crate::domain::schedule::Schedule;

/// A redirect override window as exchanged over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDto {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub alternative_url: String,
}

impl From<ScheduleDto> for Schedule {
    fn from(dto: ScheduleDto) -> Self {
        Schedule::new(dto.start, dto.end, dto.alternative_url)
    }
}

impl From<&Schedule> for ScheduleDto {
    fn from(s: &Schedule) -> Self {
        Self {
            start: s.start,
            end: s.end,
            alternative_url: s.alternative_url.clone(),
        }
    }
}

/// Request body for `POST /api/urls`.
///
/// `vanity` is optional; a blank or missing value gets a generated code.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, message = "Url is required"))]
    pub url: String,

    pub vanity: Option<String>,

    pub title: Option<String>,

    pub created_by: Option<String>,

    #[serde(default)]
    pub schedules: Vec<ScheduleDto>,
}

impl From<CreateUrlRequest> for CreateShortUrl {
    fn from(req: CreateUrlRequest) -> Self {
        Self {
            url: req.url,
            vanity: req.vanity,
            title: req.title,
            created_by: req.created_by,
            schedules: req.schedules.into_iter().map(Schedule::from).collect(),
        }
    }
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub short_url: String,
    pub long_url: String,
    pub title: String,
}

/// Request body for `POST /api/urls/update`.
///
/// Replaces destination, title and schedules. Omitted schedules clear them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(length(min = 1, message = "Vanity is required"))]
    pub vanity: String,

    #[validate(length(min = 1, message = "Url is required"))]
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub schedules: Vec<ScheduleDto>,
}

impl UpdateUrlRequest {
    pub fn into_parts(self) -> (String, ShortUrlUpdate) {
        (
            self.vanity,
            ShortUrlUpdate {
                url: self.url,
                title: self.title,
                schedules: self.schedules.into_iter().map(Schedule::from).collect(),
            },
        )
    }
}

/// Request body identifying a single record by code.
///
/// Used by archive, reactivate and delete.
#[derive(Debug, Deserialize, Validate)]
pub struct VanityRequest {
    #[validate(length(min = 1, message = "Vanity is required"))]
    pub vanity: String,
}

/// A short URL record as returned by list and update endpoints.
#[derive(Debug, Serialize)]
pub struct UrlRecordResponse {
    pub vanity: String,
    pub url: String,
    pub title: String,
    pub clicks: i64,
    pub is_archived: bool,
    pub created_date: NaiveDate,
    pub created_by: String,
    pub schedules: Vec<ScheduleDto>,
    pub short_url: String,
    pub active_url: String,
}

impl From<ShortUrlView> for UrlRecordResponse {
    fn from(view: ShortUrlView) -> Self {
        let ShortUrlView {
            record,
            short_url,
            active_url,
        } = view;

        Self {
            schedules: record.schedules.iter().map(ScheduleDto::from).collect(),
            vanity: record.vanity,
            url: record.url,
            title: record.title,
            clicks: record.clicks,
            is_archived: record.is_archived,
            created_date: record.created_date,
            created_by: record.created_by,
            short_url,
            active_url,
        }
    }
}

/// Response for list endpoints.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub items: Vec<UrlRecordResponse>,
}

/// Response for archive and reactivate.
#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub vanity: String,
    pub is_archived: bool,
}
