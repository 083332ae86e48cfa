//! Validation of destination URLs.
//!
//! Destinations must be absolute `http`/`https` URLs with a host and no
//! embedded whitespace. The accepted URL is returned trimmed but otherwise
//! untouched; redirects go to exactly what the owner entered.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("'{0}' is not a valid absolute URL")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must not contain whitespace")]
    ContainsWhitespace,
}

/// Validates an absolute HTTP(S) URL and returns it trimmed.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for blank input
/// - [`UrlValidationError::ContainsWhitespace`] for inner whitespace
/// - [`UrlValidationError::InvalidFormat`] for relative or malformed URLs
/// - [`UrlValidationError::UnsupportedProtocol`] for `ftp:`, `javascript:`, etc.
pub fn validate_http_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(UrlValidationError::ContainsWhitespace);
    }

    let url =
        Url::parse(trimmed).map_err(|_| UrlValidationError::InvalidFormat(trimmed.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            validate_http_url("http://example.com").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            validate_http_url("https://example.com/path?q=1#frag").unwrap(),
            "https://example.com/path?q=1#frag"
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            validate_http_url("  https://example.com/a  ").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            validate_http_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_http_url("example.com"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            validate_http_url("ftp://example.com/file"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_http_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_http_url("mailto:someone@example.com"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_rejects_blank_and_inner_whitespace() {
        assert_eq!(validate_http_url("   "), Err(UrlValidationError::Empty));
        assert_eq!(
            validate_http_url("https://example.com/a b"),
            Err(UrlValidationError::ContainsWhitespace)
        );
    }
}
