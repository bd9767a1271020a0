//! Opaque refresh-token generation and hashing.
//!
//! Refresh tokens are not JWTs: they are high-entropy random strings whose
//! SHA-256 digest is what gets persisted and compared. The plaintext leaves
//! the server exactly once, in the login or refresh response.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Bytes of randomness in an opaque refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// Generate a fresh opaque refresh token (URL-safe base64, no padding).
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 digest of a secret as a lowercase hex string.
pub fn sha256_hex(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_and_url_safe() {
        let token = generate_opaque_token();
        // 64 bytes of entropy encode to 86 base64 characters.
        assert_eq!(token.len(), 86);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_opaque_token(), generate_opaque_token());
    }

    #[test]
    fn hash_is_stable_hex_digest() {
        let digest = sha256_hex("secret");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, sha256_hex("secret"));
        assert_ne!(digest, sha256_hex("Secret"));
        // Known vector.
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
