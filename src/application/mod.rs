//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating repository calls,
//! validation, and business rules. They consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short URL lifecycle and redirects
//! - [`services::stats_service::StatsService`] - Per-day click statistics
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
