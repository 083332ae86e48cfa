//! Host resolution for the short URLs handed back to clients.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Extracts the host name from the `Host` header, dropping any port.
///
/// Handles IPv4 addresses, bracketed IPv6 addresses (`[::1]:8080`),
/// and plain host names.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the `Host` header is missing or is
/// not valid UTF-8.
pub fn extract_domain_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?;

    let domain = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => host[..=end_bracket].to_string(),
            None => host.to_string(),
        }
    } else {
        host.split(':').next().unwrap_or(host).to_string()
    };

    Ok(domain)
}

/// Host to embed in short URLs: the configured custom domain when present,
/// otherwise the request's own host.
pub fn resolve_host(headers: &HeaderMap, custom_domain: Option<&str>) -> Result<String, AppError> {
    match custom_domain.map(str::trim).filter(|d| !d.is_empty()) {
        Some(domain) => Ok(domain.trim_end_matches('/').to_string()),
        None => extract_domain_from_headers(headers),
    }
}

/// Joins a host and a vanity code into the public short URL.
pub fn short_url(host: &str, vanity: &str) -> String {
    format!("{}/{}", host.trim_end_matches('/'), vanity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_extract_domain_simple() {
        let headers = headers_with_host("example.com");
        assert_eq!(extract_domain_from_headers(&headers).unwrap(), "example.com");
    }

    #[test]
    fn test_extract_domain_with_port() {
        let headers = headers_with_host("example.com:3000");
        assert_eq!(extract_domain_from_headers(&headers).unwrap(), "example.com");
    }

    #[test]
    fn test_extract_domain_ip_with_port() {
        let headers = headers_with_host("192.168.1.1:9000");
        assert_eq!(extract_domain_from_headers(&headers).unwrap(), "192.168.1.1");
    }

    #[test]
    fn test_extract_domain_ipv6_with_port() {
        let headers = headers_with_host("[::1]:8080");
        assert_eq!(extract_domain_from_headers(&headers).unwrap(), "[::1]");
    }

    #[test]
    fn test_extract_domain_missing_host_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_domain_from_headers(&headers),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_custom_domain_overrides_host() {
        let headers = headers_with_host("internal.local:8080");
        assert_eq!(
            resolve_host(&headers, Some("go.example.com/")).unwrap(),
            "go.example.com"
        );
    }

    #[test]
    fn test_blank_custom_domain_falls_back_to_host() {
        let headers = headers_with_host("s.example.com");
        assert_eq!(resolve_host(&headers, Some("  ")).unwrap(), "s.example.com");
        assert_eq!(resolve_host(&headers, None).unwrap(), "s.example.com");
    }

    #[test]
    fn test_custom_domain_without_host_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            resolve_host(&headers, Some("go.example.com")).unwrap(),
            "go.example.com"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(short_url("s.example.com", "abc"), "s.example.com/abc");
        assert_eq!(short_url("s.example.com/", "a/b"), "s.example.com/a/b");
    }
}
