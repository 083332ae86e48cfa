//! Short URL lifecycle service: create, update, archive, delete, list, import.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlUpdate};
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::schedule::{Schedule, validate_schedules};
use crate::domain::vanity::{encode_id, normalize_custom_vanity};
use crate::error::AppError;
use crate::utils::request_host::short_url;
use crate::utils::url_validator::validate_http_url;

/// Attempts at finding a free generated code before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Input for [`UrlService::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateShortUrl {
    pub url: String,
    pub vanity: Option<String>,
    pub title: Option<String>,
    pub created_by: Option<String>,
    pub schedules: Vec<Schedule>,
}

/// A record as shown to callers: the record plus its public short URL and the
/// destination active at request time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortUrlView {
    pub record: ShortUrl,
    pub short_url: String,
    pub active_url: String,
}

impl ShortUrlView {
    fn new(record: ShortUrl, host: &str, at: DateTime<Utc>) -> Self {
        let short_url = short_url(host, &record.vanity);
        let active_url = record.active_url(at).to_string();
        Self {
            record,
            short_url,
            active_url,
        }
    }
}

/// Service orchestrating short URL records.
///
/// Validates input, assigns codes, and translates store results into
/// `NotFound`/`Conflict`/`Validation` errors. Active URLs are computed on
/// demand for every returned view, never cached.
pub struct UrlService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ShortUrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a short URL.
    ///
    /// Without a vanity, a code is derived from the code counter. With one,
    /// the code must be free.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not absolute HTTP(S), a
    /// schedule is malformed, or the vanity is reserved or too long.
    ///
    /// Returns [`AppError::Conflict`] if the vanity already exists. Nothing is
    /// written in either case.
    pub async fn create(
        &self,
        input: CreateShortUrl,
        host: &str,
        at: DateTime<Utc>,
    ) -> Result<ShortUrlView, AppError> {
        let url = validated_url(&input.url)?;
        validated_schedules(&input.schedules)?;

        let vanity = match normalize_custom_vanity(input.vanity.as_deref())? {
            Some(custom) => {
                if self.repository.find(&custom).await?.is_some() {
                    return Err(AppError::conflict(
                        "This short URL already exists",
                        json!({ "vanity": custom }),
                    ));
                }
                custom
            }
            None => self.generate_unique_vanity().await?,
        };

        let record = ShortUrl::new(NewShortUrl {
            vanity,
            url,
            title: input.title.unwrap_or_default().trim().to_string(),
            created_by: input.created_by.unwrap_or_default(),
            schedules: input.schedules,
        });

        self.repository.insert(&record).await?;
        tracing::info!(vanity = %record.vanity, "Short URL created");

        Ok(ShortUrlView::new(record, host, at))
    }

    /// Replaces the destination, title and schedules of an existing record.
    ///
    /// Clicks, archived flag, creation data and the code itself are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL or schedule.
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn update(
        &self,
        vanity: &str,
        update: ShortUrlUpdate,
        host: &str,
        at: DateTime<Utc>,
    ) -> Result<ShortUrlView, AppError> {
        let url = validated_url(&update.url)?;
        validated_schedules(&update.schedules)?;

        let mut record = self.get(vanity).await?;
        record.url = url;
        record.title = update.title.trim().to_string();
        record.schedules = update.schedules;

        self.repository.upsert(&record).await?;
        tracing::info!(vanity = %record.vanity, "Short URL updated");

        Ok(ShortUrlView::new(record, host, at))
    }

    /// Marks a record archived. Archived records stop redirecting and move
    /// from [`Self::list`] to [`Self::list_archived`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn archive(&self, vanity: &str) -> Result<ShortUrl, AppError> {
        self.set_archived(vanity, true).await
    }

    /// Clears the archived flag of a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn reactivate(&self, vanity: &str) -> Result<ShortUrl, AppError> {
        self.set_archived(vanity, false).await
    }

    async fn set_archived(&self, vanity: &str, archived: bool) -> Result<ShortUrl, AppError> {
        let mut record = self.get(vanity).await?;
        record.is_archived = archived;
        self.repository.upsert(&record).await?;
        tracing::info!(vanity = %record.vanity, archived, "Short URL archive flag changed");
        Ok(record)
    }

    /// Permanently deletes a record.
    ///
    /// Deleting an unknown code is an error, not a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist, including
    /// when it disappears between the lookup and the delete.
    pub async fn delete(&self, vanity: &str) -> Result<(), AppError> {
        self.get(vanity).await?;

        if !self.repository.delete(vanity).await? {
            return Err(not_found(vanity));
        }

        tracing::info!(vanity, "Short URL deleted");
        Ok(())
    }

    /// Fetches a record by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn get(&self, vanity: &str) -> Result<ShortUrl, AppError> {
        self.repository
            .find(vanity)
            .await?
            .ok_or_else(|| not_found(vanity))
    }

    /// Lists all records that are not archived.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    pub async fn list(&self, host: &str, at: DateTime<Utc>) -> Result<Vec<ShortUrlView>, AppError> {
        self.list_views(false, host, at).await
    }

    /// Lists all archived records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on store errors.
    pub async fn list_archived(
        &self,
        host: &str,
        at: DateTime<Utc>,
    ) -> Result<Vec<ShortUrlView>, AppError> {
        self.list_views(true, host, at).await
    }

    async fn list_views(
        &self,
        archived: bool,
        host: &str,
        at: DateTime<Utc>,
    ) -> Result<Vec<ShortUrlView>, AppError> {
        Ok(self
            .repository
            .list(archived)
            .await?
            .into_iter()
            .map(|record| ShortUrlView::new(record, host, at))
            .collect())
    }

    /// Resolves the destination a redirect for `vanity` should go to at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Gone`] if the record is archived.
    pub async fn resolve_redirect(
        &self,
        vanity: &str,
        at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let record = self.get(vanity).await?;

        if record.is_archived {
            return Err(AppError::gone(
                "Short URL has been archived",
                json!({ "vanity": vanity }),
            ));
        }

        Ok(record.active_url(at).to_string())
    }

    /// Upserts imported records, then the code counter if given.
    ///
    /// Every record's destination and schedules are checked before the first
    /// write. Items are then written one by one without rollback; the first
    /// store failure aborts the rest of the batch and is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the first invalid item, with
    /// nothing written, or the first store error encountered.
    pub async fn import(
        &self,
        records: &[ShortUrl],
        next_id: Option<i64>,
    ) -> Result<usize, AppError> {
        for (index, record) in records.iter().enumerate() {
            validate_imported(index, record)?;
        }

        for record in records {
            self.repository.upsert(record).await?;
        }

        if let Some(id) = next_id {
            self.repository.set_next_id(id).await?;
        }

        tracing::info!(count = records.len(), next_id, "Short URLs imported");
        Ok(records.len())
    }

    /// Checks that the record store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store is unreachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Derives a free code from the code counter.
    async fn generate_unique_vanity(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let id = self.repository.next_id().await?;
            let id = u64::try_from(id).map_err(|_| {
                AppError::internal("Code counter is negative", json!({ "next_id": id }))
            })?;
            let code = encode_id(id);

            if self.repository.find(&code).await?.is_none() {
                return Ok(code);
            }
            tracing::debug!(code, "Generated code already taken, advancing counter");
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

fn not_found(vanity: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "vanity": vanity }))
}

fn validated_url(url: &str) -> Result<String, AppError> {
    validate_http_url(url).map_err(|e| {
        AppError::bad_request(
            "Url must be an absolute URL starting with 'http://' or 'https://'",
            json!({ "url": url, "reason": e.to_string() }),
        )
    })
}

fn validated_schedules(schedules: &[Schedule]) -> Result<(), AppError> {
    validate_schedules(schedules).map_err(|(index, e)| {
        AppError::bad_request(
            "Invalid schedule",
            json!({ "index": index, "reason": e.to_string() }),
        )
    })
}

fn validate_imported(index: usize, record: &ShortUrl) -> Result<(), AppError> {
    if let Err(e) = validate_http_url(&record.url) {
        return Err(AppError::bad_request(
            "Imported url must be an absolute URL starting with 'http://' or 'https://'",
            json!({ "index": index, "vanity": record.vanity, "reason": e.to_string() }),
        ));
    }

    validate_schedules(&record.schedules).map_err(|(schedule, e)| {
        AppError::bad_request(
            "Imported record has an invalid schedule",
            json!({
                "index": index,
                "vanity": record.vanity,
                "schedule": schedule,
                "reason": e.to_string(),
            }),
        )
    })
}
