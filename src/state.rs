//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, StatsService, UrlService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickStatsRepository, ShortUrlRepository};

/// Services and settings shared by all requests.
///
/// Services hold their repositories as trait objects, so the same state
/// serves PostgreSQL in production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn ShortUrlRepository>>,
    pub stats_service: Arc<StatsService<dyn ClickStatsRepository>>,
    pub auth_service: Arc<AuthService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Host for emitted short URLs; the request `Host` header when `None`.
    pub custom_domain: Option<String>,
    /// Redirect target for unknown codes; 404 when `None`.
    pub default_redirect_url: Option<String>,
}

impl AppState {
    pub fn new(
        short_urls: Arc<dyn ShortUrlRepository>,
        click_stats: Arc<dyn ClickStatsRepository>,
        auth_service: AuthService,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(short_urls)),
            stats_service: Arc::new(StatsService::new(click_stats)),
            auth_service: Arc::new(auth_service),
            click_sender,
            custom_domain: None,
            default_redirect_url: None,
        }
    }

    pub fn with_custom_domain(mut self, custom_domain: Option<String>) -> Self {
        self.custom_domain = custom_domain;
        self
    }

    pub fn with_default_redirect_url(mut self, default_redirect_url: Option<String>) -> Self {
        self.default_redirect_url = default_redirect_url;
        self
    }
}
