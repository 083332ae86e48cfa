//! Business logic services for the application layer.

pub mod auth_service;
pub mod stats_service;
pub mod url_service;

pub use auth_service::AuthService;
pub use stats_service::StatsService;
pub use url_service::{CreateShortUrl, ShortUrlView, UrlService};
