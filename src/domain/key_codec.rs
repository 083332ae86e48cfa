//! Reversible encoding of short codes into storage-safe keys.
//!
//! Table keys may not contain `/`, `\`, `#`, `?` or control characters, while
//! vanity codes are free text. Every byte outside the RFC 3986 unreserved set
//! (`A-Z a-z 0-9 - _ . ~`) is percent-encoded, so the encoded form never
//! contains a forbidden character and decodes back to the exact input.
//!
//! Encoded keys must not leave the persistence layer: encode right before a
//! write or key lookup, decode right after a read.

use std::borrow::Cow;

/// Errors that can occur while decoding a stored key.
#[derive(Debug, thiserror::Error)]
pub enum KeyCodecError {
    #[error("Stored key is not valid percent-encoded UTF-8: {0}")]
    InvalidEncoding(String),
}

/// Percent-encodes a short code for use as a partition or row key.
///
/// Total and deterministic; the empty string maps to the empty string.
pub fn encode_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    urlencoding::encode(key).into_owned()
}

/// Inverse of [`encode_key`].
///
/// # Errors
///
/// Returns [`KeyCodecError::InvalidEncoding`] when the percent escapes decode
/// to invalid UTF-8. This cannot happen for keys produced by [`encode_key`].
pub fn decode_key(key: &str) -> Result<String, KeyCodecError> {
    if key.is_empty() {
        return Ok(String::new());
    }
    urlencoding::decode(key)
        .map(Cow::into_owned)
        .map_err(|_| KeyCodecError::InvalidEncoding(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORBIDDEN: [char; 4] = ['/', '\\', '#', '?'];

    fn assert_round_trip(key: &str) {
        let encoded = encode_key(key);
        assert_eq!(decode_key(&encoded).unwrap(), key, "round trip of {key:?}");
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(encode_key(""), "");
        assert_eq!(decode_key("").unwrap(), "");
    }

    #[test]
    fn test_plain_code_is_unchanged() {
        assert_eq!(encode_key("abc123"), "abc123");
        assert_eq!(encode_key("my-link_v1.0~x"), "my-link_v1.0~x");
    }

    #[test]
    fn test_forbidden_characters_are_escaped() {
        let encoded = encode_key("a/b\\c#d?e\u{7}f\n");
        assert!(!encoded.chars().any(|c| FORBIDDEN.contains(&c)));
        assert!(!encoded.chars().any(char::is_control));
        assert_eq!(encoded, "a%2Fb%5Cc%23d%3Fe%07f%0A");
    }

    #[test]
    fn test_round_trips() {
        assert_round_trip("");
        assert_round_trip("promo/2024");
        assert_round_trip("what?#now");
        assert_round_trip("back\\slash");
        assert_round_trip("tab\tnull\0bell\u{7}");
        assert_round_trip("café-日本語-🚀");
        assert_round_trip("100%");
        assert_round_trip("%2F already looks encoded");
        assert_round_trip("spaces and + plus");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(encode_key("x/y"), encode_key("x/y"));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_key("%FF%FE").is_err());
    }
}
