//! Background worker persisting click events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::ClickStat;
use crate::domain::repositories::{ClickStatsRepository, ShortUrlRepository};
use crate::error::AppError;

/// Attempts per store write, including the first one.
const MAX_ATTEMPTS: usize = 3;

fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(50)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(MAX_ATTEMPTS - 1)
}

/// Consumes click events until every sender is dropped.
///
/// Each event increments the record's click count and appends one
/// [`ClickStat`] row. Store writes are retried with exponential backoff;
/// an event that still fails is logged and counted, never re-queued.
pub async fn run_click_worker<U, C>(
    mut rx: mpsc::Receiver<ClickEvent>,
    short_urls: Arc<U>,
    click_stats: Arc<C>,
) where
    U: ShortUrlRepository + ?Sized,
    C: ClickStatsRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        match process_click(&event, short_urls.as_ref(), click_stats.as_ref()).await {
            Ok(()) => {
                metrics::counter!("clicks_recorded_total").increment(1);
            }
            Err(e) => {
                metrics::counter!("clicks_failed_total").increment(1);
                tracing::error!(vanity = %event.vanity, error = %e, "Failed to record click");
            }
        }
    }

    tracing::info!("Click worker stopped: channel closed");
}

async fn process_click<U, C>(
    event: &ClickEvent,
    short_urls: &U,
    click_stats: &C,
) -> Result<(), AppError>
where
    U: ShortUrlRepository + ?Sized,
    C: ClickStatsRepository + ?Sized,
{
    let found = Retry::spawn(retry_strategy(), || {
        short_urls.increment_clicks(&event.vanity)
    })
    .await?;

    if !found {
        tracing::warn!(vanity = %event.vanity, "Click for a code that no longer exists");
        return Ok(());
    }

    let stat = ClickStat::new_click(event.vanity.clone(), event.clicked_at);
    Retry::spawn(retry_strategy(), || click_stats.record(&stat)).await
}
