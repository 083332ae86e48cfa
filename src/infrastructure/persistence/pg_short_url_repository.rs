//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::schedule_blob::{decode_schedules, encode_schedules};
use crate::domain::entities::ShortUrl;
use crate::domain::key_codec::{decode_key, encode_key};
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::vanity::partition_key;
use crate::error::AppError;

const NEXT_ID_PARTITION: &str = "1";
const NEXT_ID_ROW: &str = "KEY";

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    row_key: String,
    url: String,
    title: String,
    clicks: i64,
    is_archived: bool,
    created_date: NaiveDate,
    created_by: String,
    schedules_raw: String,
}

impl TryFrom<ShortUrlRow> for ShortUrl {
    type Error = AppError;

    fn try_from(row: ShortUrlRow) -> Result<Self, Self::Error> {
        let vanity = decode_key(&row.row_key).map_err(|e| {
            AppError::storage(
                "Stored key is not valid",
                json!({ "row_key": row.row_key, "reason": e.to_string() }),
            )
        })?;

        let schedules = decode_schedules(&row.schedules_raw).map_err(|e| {
            AppError::storage(
                "Stored schedules are not valid",
                json!({ "vanity": vanity, "reason": e.to_string() }),
            )
        })?;

        Ok(ShortUrl {
            vanity,
            url: row.url,
            title: row.title,
            clicks: row.clicks,
            is_archived: row.is_archived,
            created_date: row.created_date,
            created_by: row.created_by,
            schedules,
        })
    }
}

fn schedules_raw(record: &ShortUrl) -> Result<String, AppError> {
    encode_schedules(&record.schedules).map_err(|e| {
        AppError::internal(
            "Failed to serialize schedules",
            json!({ "vanity": record.vanity, "reason": e.to_string() }),
        )
    })
}

/// PostgreSQL repository for short URL records.
///
/// Row keys are the encoded vanity code; the partition key is derived from
/// its first character.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find(&self, vanity: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT row_key, url, title, clicks, is_archived, created_date, created_by, schedules_raw
            FROM short_urls
            WHERE partition_key = $1 AND row_key = $2
            "#,
        )
        .bind(partition_key(vanity))
        .bind(encode_key(vanity))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortUrl::try_from).transpose()
    }

    async fn insert(&self, record: &ShortUrl) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO short_urls
                (partition_key, row_key, url, title, clicks, is_archived, created_date, created_by, schedules_raw)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.partition_key())
        .bind(encode_key(&record.vanity))
        .bind(&record.url)
        .bind(&record.title)
        .bind(record.clicks)
        .bind(record.is_archived)
        .bind(record.created_date)
        .bind(&record.created_by)
        .bind(schedules_raw(record)?)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn upsert(&self, record: &ShortUrl) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO short_urls
                (partition_key, row_key, url, title, clicks, is_archived, created_date, created_by, schedules_raw)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (partition_key, row_key) DO UPDATE SET
                url = EXCLUDED.url,
                title = EXCLUDED.title,
                clicks = EXCLUDED.clicks,
                is_archived = EXCLUDED.is_archived,
                created_date = EXCLUDED.created_date,
                created_by = EXCLUDED.created_by,
                schedules_raw = EXCLUDED.schedules_raw,
                updated_at = NOW()
            "#,
        )
        .bind(record.partition_key())
        .bind(encode_key(&record.vanity))
        .bind(&record.url)
        .bind(&record.title)
        .bind(record.clicks)
        .bind(record.is_archived)
        .bind(record.created_date)
        .bind(&record.created_by)
        .bind(schedules_raw(record)?)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, vanity: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM short_urls WHERE partition_key = $1 AND row_key = $2")
                .bind(partition_key(vanity))
                .bind(encode_key(vanity))
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, archived: bool) -> Result<Vec<ShortUrl>, AppError> {
        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT row_key, url, title, clicks, is_archived, created_date, created_by, schedules_raw
            FROM short_urls
            WHERE is_archived = $1
            ORDER BY partition_key, row_key
            "#,
        )
        .bind(archived)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ShortUrl::try_from).collect()
    }

    async fn increment_clicks(&self, vanity: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET clicks = clicks + 1
            WHERE partition_key = $1 AND row_key = $2
            "#,
        )
        .bind(partition_key(vanity))
        .bind(encode_key(vanity))
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn next_id(&self) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO next_ids (partition_key, row_key, id)
            VALUES ($1, $2, 1025)
            ON CONFLICT (partition_key, row_key) DO UPDATE SET id = next_ids.id + 1
            RETURNING id
            "#,
        )
        .bind(NEXT_ID_PARTITION)
        .bind(NEXT_ID_ROW)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn set_next_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO next_ids (partition_key, row_key, id)
            VALUES ($1, $2, $3)
            ON CONFLICT (partition_key, row_key) DO UPDATE SET id = EXCLUDED.id
            "#,
        )
        .bind(NEXT_ID_PARTITION)
        .bind(NEXT_ID_ROW)
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row_key: &str, schedules_raw: &str) -> ShortUrlRow {
        ShortUrlRow {
            row_key: row_key.to_string(),
            url: "https://example.com".to_string(),
            title: "t".to_string(),
            clicks: 3,
            is_archived: false,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_by: "bob".to_string(),
            schedules_raw: schedules_raw.to_string(),
        }
    }

    #[test]
    fn test_row_key_is_decoded() {
        let record = ShortUrl::try_from(row("a%2Fb%3Fc", "")).unwrap();
        assert_eq!(record.vanity, "a/b?c");
        assert!(record.schedules.is_empty());
        assert_eq!(record.clicks, 3);
    }

    #[test]
    fn test_malformed_row_key_is_storage_error() {
        let result = ShortUrl::try_from(row("%FF%FE", ""));
        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }

    #[test]
    fn test_malformed_schedules_is_storage_error() {
        let result = ShortUrl::try_from(row("abc", "{broken"));
        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }
}
