//! Authentication service for API bearer tokens.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::AppError;
use serde_json::json;

/// Hashes a raw token with SHA-256.
///
/// Returns a 64-character lowercase hex digest, the format expected in
/// `API_TOKEN_HASHES`.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Only digests of accepted tokens are configured, so the environment never
/// holds a usable credential.
pub struct AuthService {
    token_hashes: HashSet<String>,
}

impl AuthService {
    /// Creates an authentication service accepting the given token digests.
    ///
    /// Digests are compared case-insensitively.
    pub fn new<I, S>(token_hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            token_hashes: token_hashes
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token's digest is not configured.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if self.token_hashes.contains(&hash_token(token)) {
            return Ok(());
        }

        Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Invalid or revoked token" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AuthService::new([hash_token("valid-token")]);
        assert!(service.authenticate("valid-token").is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let service = AuthService::new([hash_token("valid-token")]);
        let result = service.authenticate("invalid-token");
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_uppercase_digest_accepted() {
        let service = AuthService::new([hash_token("tok").to_uppercase()]);
        assert!(service.authenticate("tok").is_ok());
    }

    #[test]
    fn test_multiple_tokens() {
        let service = AuthService::new(vec![hash_token("one"), hash_token("two")]);
        assert!(service.authenticate("one").is_ok());
        assert!(service.authenticate("two").is_ok());
        assert!(service.authenticate("three").is_err());
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token("test-token");
        let hash2 = hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash_token("token1"), hash_token("token2"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
