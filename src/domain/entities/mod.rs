//! Core domain entities.
//!
//! Entities are plain data. Keys inside them are always the decoded,
//! user-facing form; storage encoding happens in the persistence layer.
//!
//! # Entity Types
//!
//! - [`ShortUrl`] - A vanity code with its destination and schedules
//! - [`ClickStat`] - A stored click-statistics row
//! - [`ClickDate`] - Clicks aggregated per day
//!
//! Creation and mutation inputs use separate structs: [`NewShortUrl`] and
//! [`ShortUrlUpdate`].

pub mod click_stat;
pub mod short_url;

pub use click_stat::{CLICK_DATETIME_FORMAT, ClickDate, ClickStat};
pub use short_url::{NewShortUrl, ShortUrl, ShortUrlUpdate};
