//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod import;
pub mod redirect;
pub mod stats;
pub mod urls;

pub use health::health_handler;
pub use import::{import_clicks_handler, import_urls_handler};
pub use redirect::redirect_handler;
pub use stats::click_stats_by_day_handler;
pub use urls::{
    archive_url_handler, create_url_handler, delete_url_handler, list_archived_urls_handler,
    list_urls_handler, reactivate_url_handler, update_url_handler,
};
