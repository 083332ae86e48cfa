//! # Vanity Shortener
//!
//! Maps short vanity codes to destination URLs. A code can carry schedules
//! that send visitors to an alternative destination for a time window, and
//! every redirect is counted into per-day click statistics.
//!
//! ## Layers
//!
//! - [`domain`] - records, key encoding, schedule resolution, repository
//!   contracts and the click worker; no I/O
//! - [`application`] - services that validate input and drive repositories
//! - [`infrastructure`] - PostgreSQL repositories and the schedule blob codec
//! - [`api`] - DTOs, handlers and middleware of the HTTP surface
//!
//! [`server::run`] wires them together; [`routes::app_router`] builds the
//! router and [`config`] documents every environment variable.
//!
//! ## Running
//!
//! Point `DATABASE_URL` at a PostgreSQL database, create a token with
//! `cargo run --bin admin -- token generate`, put the printed digest in
//! `API_TOKEN_HASHES` and start the server with `cargo run`. Migrations are
//! applied on startup.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Types most callers and integration tests need.
pub mod prelude {
    pub use crate::application::services::{AuthService, StatsService, UrlService};
    pub use crate::domain::click_event::ClickEvent;
    pub use crate::domain::entities::{ClickDate, ClickStat, ShortUrl};
    pub use crate::domain::repositories::{ClickStatsRepository, ShortUrlRepository};
    pub use crate::domain::schedule::Schedule;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
