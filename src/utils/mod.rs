//! Helpers shared by handlers and services.
//!
//! - [`url_validator`] - Absolute HTTP(S) URL validation
//! - [`request_host`] - Host resolution for emitted short URLs

pub mod request_host;
pub mod url_validator;
