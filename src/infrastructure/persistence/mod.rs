//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Keys are
//! encoded on the way in and decoded on the way out, so nothing above this
//! layer ever sees the stored form.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - Short URL records and the code counter
//! - [`PgClickStatsRepository`] - Click-statistics rows

pub mod pg_click_stats_repository;
pub mod pg_short_url_repository;
pub mod schedule_blob;

pub use pg_click_stats_repository::PgClickStatsRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
