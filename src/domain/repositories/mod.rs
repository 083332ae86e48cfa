//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Short URL records and the code counter
//! - [`ClickStatsRepository`] - Click-statistics rows

pub mod click_stats_repository;
pub mod short_url_repository;

pub use click_stats_repository::ClickStatsRepository;
pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use click_stats_repository::MockClickStatsRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
