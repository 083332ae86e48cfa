//! Vanity code rules: auto-generated codes, custom code checks, partitioning.

use crate::domain::key_codec::encode_key;
use crate::error::AppError;
use serde_json::json;

/// Digits used to render counter values as short codes.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Maximum length of a custom vanity code, in characters.
pub const MAX_VANITY_LENGTH: usize = 200;

/// First path segments taken by service routes.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Partition used for codes whose first segment is empty.
const EMPTY_SEGMENT_PARTITION: &str = "_";

/// Renders a counter value in base 62, most significant digit first.
///
/// `0` renders as `"a"`.
pub fn encode_id(mut id: u64) -> String {
    let base = ALPHABET.len() as u64;
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::new();
    while id > 0 {
        digits.push(ALPHABET[(id % base) as usize] as char);
        id /= base;
    }
    digits.iter().rev().collect()
}

/// Normalizes an optional user-supplied vanity.
///
/// Returns `Ok(None)` when the vanity is absent or blank (a code will be
/// generated), otherwise the trimmed code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the code is too long or its first
/// `/`-separated segment is reserved.
pub fn normalize_custom_vanity(vanity: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(code) = vanity.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let length = code.chars().count();
    if length > MAX_VANITY_LENGTH {
        return Err(AppError::bad_request(
            format!("Vanity code must be at most {MAX_VANITY_LENGTH} characters"),
            json!({ "provided_length": length }),
        ));
    }

    let first_segment = code.split('/').next().unwrap_or_default();
    if RESERVED_CODES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(first_segment))
    {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "vanity": code }),
        ));
    }

    Ok(Some(code.to_string()))
}

/// Storage partition for a vanity code.
///
/// The first character of the first `/`-separated segment, or `_` when that
/// segment is empty. The result is key-encoded so it is always storage-safe.
pub fn partition_key(vanity: &str) -> String {
    let first_segment = vanity.split('/').next().unwrap_or_default();
    match first_segment.chars().next() {
        Some(c) => encode_key(c.encode_utf8(&mut [0u8; 4])),
        None => EMPTY_SEGMENT_PARTITION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_id_small_values() {
        assert_eq!(encode_id(0), "a");
        assert_eq!(encode_id(1), "b");
        assert_eq!(encode_id(61), "9");
        assert_eq!(encode_id(62), "ba");
    }

    #[test]
    fn test_encode_id_first_generated_code() {
        // counter is seeded at 1024 and incremented before use
        assert_eq!(encode_id(1025), "qH");
    }

    #[test]
    fn test_encode_id_is_unique_for_consecutive_ids() {
        let codes: std::collections::HashSet<String> = (1025..3025).map(encode_id).collect();
        assert_eq!(codes.len(), 2000);
    }

    #[test]
    fn test_blank_vanity_means_generate() {
        assert_eq!(normalize_custom_vanity(None).unwrap(), None);
        assert_eq!(normalize_custom_vanity(Some("")).unwrap(), None);
        assert_eq!(normalize_custom_vanity(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_custom_vanity_is_trimmed() {
        assert_eq!(
            normalize_custom_vanity(Some("  promo ")).unwrap(),
            Some("promo".to_string())
        );
    }

    #[test]
    fn test_custom_vanity_allows_any_characters() {
        assert_eq!(
            normalize_custom_vanity(Some("a/b?c#d")).unwrap(),
            Some("a/b?c#d".to_string())
        );
    }

    #[test]
    fn test_reserved_vanity_rejected() {
        assert!(matches!(
            normalize_custom_vanity(Some("API")),
            Err(AppError::Validation { .. })
        ));
        assert!(normalize_custom_vanity(Some("health")).is_err());
    }

    #[test]
    fn test_reserved_first_segment_rejected() {
        assert!(normalize_custom_vanity(Some("api/promo")).is_err());
        assert!(normalize_custom_vanity(Some("Api/urls/x")).is_err());
        assert!(normalize_custom_vanity(Some("api/")).is_err());
        assert_eq!(
            normalize_custom_vanity(Some("apiary/promo")).unwrap(),
            Some("apiary/promo".to_string())
        );
        assert_eq!(
            normalize_custom_vanity(Some("promo/api")).unwrap(),
            Some("promo/api".to_string())
        );
    }

    #[test]
    fn test_too_long_vanity_rejected() {
        let long = "x".repeat(MAX_VANITY_LENGTH + 1);
        assert!(normalize_custom_vanity(Some(&long)).is_err());
        let max = "x".repeat(MAX_VANITY_LENGTH);
        assert!(normalize_custom_vanity(Some(&max)).is_ok());
    }

    #[test]
    fn test_partition_key() {
        assert_eq!(partition_key("abc"), "a");
        assert_eq!(partition_key("Zed/more"), "Z");
        assert_eq!(partition_key("/leading"), "_");
        assert_eq!(partition_key("#tag"), "%23");
        assert_eq!(partition_key("été"), "%C3%A9");
    }
}
