//! Domain layer: entities, repository contracts and pure business rules.
//!
//! Nothing here depends on the HTTP or persistence layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`key_codec`] - Reversible storage-key encoding of vanity codes
//! - [`schedule`] - Scheduled overrides and active-URL resolution
//! - [`vanity`] - Code generation, custom code rules and partitioning
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves the active URL
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] increments the count and appends a
//!    click-statistics row, with retry

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod key_codec;
pub mod repositories;
pub mod schedule;
pub mod vanity;
