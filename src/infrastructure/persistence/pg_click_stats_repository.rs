//! PostgreSQL implementation of the click statistics repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ClickStat;
use crate::domain::key_codec::{decode_key, encode_key};
use crate::domain::repositories::ClickStatsRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickStatRow {
    partition_key: String,
    row_key: String,
    datetime: String,
    count: i64,
}

impl TryFrom<ClickStatRow> for ClickStat {
    type Error = AppError;

    fn try_from(row: ClickStatRow) -> Result<Self, Self::Error> {
        let decode = |key: &str| {
            decode_key(key).map_err(|e| {
                AppError::storage(
                    "Stored key is not valid",
                    json!({ "key": key, "reason": e.to_string() }),
                )
            })
        };

        Ok(ClickStat {
            vanity: decode(&row.partition_key)?,
            row_key: decode(&row.row_key)?,
            datetime: row.datetime,
            count: row.count,
        })
    }
}

/// PostgreSQL repository for click-statistics rows.
///
/// Rows are partitioned by the encoded vanity code they belong to.
pub struct PgClickStatsRepository {
    pool: Arc<PgPool>,
}

impl PgClickStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickStatsRepository for PgClickStatsRepository {
    async fn record(&self, stat: &ClickStat) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO click_stats (partition_key, row_key, datetime, count)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(encode_key(&stat.vanity))
        .bind(encode_key(&stat.row_key))
        .bind(&stat.datetime)
        .bind(stat.count)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn upsert(&self, stat: &ClickStat) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO click_stats (partition_key, row_key, datetime, count)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (partition_key, row_key) DO UPDATE SET
                datetime = EXCLUDED.datetime,
                count = EXCLUDED.count
            "#,
        )
        .bind(encode_key(&stat.vanity))
        .bind(encode_key(&stat.row_key))
        .bind(&stat.datetime)
        .bind(stat.count)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list(&self, vanity: Option<String>) -> Result<Vec<ClickStat>, AppError> {
        let rows = sqlx::query_as::<_, ClickStatRow>(
            r#"
            SELECT partition_key, row_key, datetime, count
            FROM click_stats
            WHERE ($1::text IS NULL OR partition_key = $1)
            "#,
        )
        .bind(vanity.as_deref().map(encode_key))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ClickStat::try_from).collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM click_stats")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
