//! Signed token minting and verification.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authhub_core::clock::Clock;
use authhub_core::config::auth::AuthConfig;
use authhub_core::error::AppError;

use super::claims::{TokenPayload, TokenPurpose};
use super::opaque::generate_opaque_token;

/// A minted access token with its timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The compact signed token string.
    pub token: String,
    /// Issued-at (seconds since epoch).
    pub created_at: i64,
    /// Expiry (seconds since epoch).
    pub expires_at: i64,
}

/// A minted opaque refresh token. The plaintext is returned to the client
/// exactly once and only its hash is ever stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueRefreshToken {
    /// The opaque token value.
    pub token: String,
    /// Expiry (seconds since epoch).
    pub expires_at: i64,
}

/// An access + refresh token pair as returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived signed access token.
    pub access_token: AccessToken,
    /// Long-lived opaque refresh token.
    pub refresh_token: OpaqueRefreshToken,
}

/// Mints and verifies signed tokens carrying [`TokenPayload`].
///
/// Signature verification is delegated to `jsonwebtoken`; the expiry claim
/// is checked against the injected clock so token lifetimes are testable.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature validation configuration.
    validation: Validation,
    /// Access token TTL in seconds.
    access_token_ttl_seconds: i64,
    /// Default refresh token TTL in days.
    refresh_token_ttl_days: i64,
    /// Email confirmation token TTL in days.
    email_confirmation_ttl_days: i64,
    /// Time source for iat/exp math.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the injected clock, not the wall clock
        // inside the JWT library.
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            access_token_ttl_seconds: config.access_token_ttl_seconds as i64,
            refresh_token_ttl_days: config.refresh_token_ttl_days as i64,
            email_confirmation_ttl_days: config.email_confirmation_ttl_days as i64,
            clock,
        }
    }

    /// Default refresh token TTL in days.
    pub fn refresh_token_ttl_days(&self) -> i64 {
        self.refresh_token_ttl_days
    }

    /// Builds the claim set for a new access token.
    ///
    /// The role name is a snapshot: role changes do not affect tokens
    /// already in flight until the next mint.
    pub fn make_access_token_payload(
        &self,
        user_id: i64,
        user_role: &str,
        session_id: Uuid,
        fingerprint: Option<String>,
    ) -> TokenPayload {
        let iat = self.clock.now_ts();
        TokenPayload {
            sub: user_id.to_string(),
            sid: Some(session_id.to_string()),
            iat,
            exp: iat + self.access_token_ttl_seconds,
            jti: Some(Uuid::new_v4().to_string()),
            role: Some(user_role.to_string()),
            purpose: TokenPurpose::Access,
            fingerprint,
        }
    }

    /// Signs an access-token payload.
    pub fn create_access_token(&self, payload: &TokenPayload) -> Result<AccessToken, AppError> {
        let token = self.encode(payload)?;
        Ok(AccessToken {
            token,
            created_at: payload.iat,
            expires_at: payload.exp,
        })
    }

    /// Generates a fresh opaque refresh token with the given TTL in days
    /// (the configured default when `None`).
    pub fn create_refresh_token(&self, ttl_days: Option<i64>) -> OpaqueRefreshToken {
        let days = ttl_days.unwrap_or(self.refresh_token_ttl_days);
        OpaqueRefreshToken {
            token: generate_opaque_token(),
            expires_at: self.clock.now_ts() + days * 86_400,
        }
    }

    /// Mints a complete access + refresh pair for the given user and session.
    pub fn token_pair(
        &self,
        user_id: i64,
        user_role: &str,
        session_id: Uuid,
        refresh_ttl_days: Option<i64>,
    ) -> Result<TokenPair, AppError> {
        let payload = self.make_access_token_payload(user_id, user_role, session_id, None);
        let access_token = self.create_access_token(&payload)?;
        let refresh_token = self.create_refresh_token(refresh_ttl_days);
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mints an email-confirmation token carrying only the subject.
    pub fn create_email_confirmation_token(&self, user_id: i64) -> Result<String, AppError> {
        let iat = self.clock.now_ts();
        let payload = TokenPayload {
            sub: user_id.to_string(),
            sid: None,
            iat,
            exp: iat + self.email_confirmation_ttl_days * 86_400,
            jti: None,
            role: None,
            purpose: TokenPurpose::EmailConfirmation,
            fingerprint: None,
        };
        self.encode(&payload)
    }

    /// Verifies an access token: signature, expiry, and purpose.
    pub fn verify_access_token(&self, token: &str) -> Result<TokenPayload, AppError> {
        let payload = self.decode(token, None)?;
        if payload.purpose != TokenPurpose::Access {
            return Err(AppError::authentication(format!(
                "Invalid token purpose: {}",
                payload.purpose
            )));
        }
        Ok(payload)
    }

    /// Verifies an email-confirmation token and returns the subject user id.
    pub fn verify_email_confirmation_token(&self, token: &str) -> Result<i64, AppError> {
        let payload = self.decode(token, None)?;
        if payload.purpose != TokenPurpose::EmailConfirmation {
            return Err(AppError::authentication(format!(
                "Invalid token purpose: {}",
                payload.purpose
            )));
        }
        payload.user_id()
    }

    /// Decodes and verifies a token.
    ///
    /// Checks, in order: signature and structure, expiry against the
    /// injected clock, then the optional caller-supplied fingerprint against
    /// the embedded claim. A mismatch on any of them is a verification
    /// failure, never silently ignored.
    pub fn decode(
        &self,
        token: &str,
        fingerprint: Option<&str>,
    ) -> Result<TokenPayload, AppError> {
        let data = decode::<TokenPayload>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                _ => AppError::authentication(format!("Token verification failed: {e}")),
            },
        )?;

        let payload = data.claims;

        if payload.exp <= self.clock.now_ts() {
            return Err(AppError::authentication("Token has expired"));
        }

        if let Some(expected) = fingerprint {
            if payload.fingerprint.as_deref() != Some(expected) {
                return Err(AppError::authentication("Token fingerprint mismatch"));
            }
        }

        Ok(payload)
    }

    /// Serializes and signs a payload.
    fn encode(&self, payload: &TokenPayload) -> Result<String, AppError> {
        encode(&Header::default(), payload, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authhub_core::clock::FixedClock;
    use authhub_core::error::ErrorKind;

    const NOW: i64 = 1_700_000_000;

    fn codec_with_clock() -> (TokenCodec, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::at(NOW));
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        };
        (TokenCodec::new(&config, clock.clone()), clock)
    }

    #[test]
    fn access_token_round_trip() {
        let (codec, _) = codec_with_clock();
        let session_id = Uuid::new_v4();
        let payload = codec.make_access_token_payload(7, "user", session_id, None);
        let access = codec.create_access_token(&payload).unwrap();

        let decoded = codec.verify_access_token(&access.token).unwrap();
        assert_eq!(decoded.user_id().unwrap(), 7);
        assert_eq!(decoded.session_id().unwrap(), session_id);
        assert_eq!(decoded.role.as_deref(), Some("user"));
        assert_eq!(decoded.purpose, TokenPurpose::Access);
        assert_eq!(access.expires_at, NOW + 1200);
    }

    #[test]
    fn each_mint_gets_a_fresh_jti() {
        let (codec, _) = codec_with_clock();
        let session_id = Uuid::new_v4();
        let a = codec.make_access_token_payload(1, "user", session_id, None);
        let b = codec.make_access_token_payload(1, "user", session_id, None);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn expired_token_is_rejected() {
        let (codec, clock) = codec_with_clock();
        let payload = codec.make_access_token_payload(1, "user", Uuid::new_v4(), None);
        let access = codec.create_access_token(&payload).unwrap();

        clock.advance(1200);
        let err = codec.verify_access_token(&access.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let (codec, _) = codec_with_clock();
        let payload = codec.make_access_token_payload(1, "user", Uuid::new_v4(), None);
        let access = codec.create_access_token(&payload).unwrap();

        let other = TokenCodec::new(
            &AuthConfig {
                jwt_secret: "different-secret".to_string(),
                ..AuthConfig::default()
            },
            Arc::new(FixedClock::at(NOW)),
        );
        assert!(other.verify_access_token(&access.token).is_err());
    }

    #[test]
    fn purpose_isolation_both_ways() {
        let (codec, _) = codec_with_clock();

        let confirmation = codec.create_email_confirmation_token(3).unwrap();
        let err = codec.verify_access_token(&confirmation).unwrap_err();
        assert!(err.message.contains("email_confirmation"));

        let payload = codec.make_access_token_payload(3, "user", Uuid::new_v4(), None);
        let access = codec.create_access_token(&payload).unwrap();
        let err = codec
            .verify_email_confirmation_token(&access.token)
            .unwrap_err();
        assert!(err.message.contains("access"));
    }

    #[test]
    fn email_confirmation_round_trip_carries_only_subject() {
        let (codec, _) = codec_with_clock();
        let token = codec.create_email_confirmation_token(11).unwrap();
        assert_eq!(codec.verify_email_confirmation_token(&token).unwrap(), 11);

        let payload = codec.decode(&token, None).unwrap();
        assert!(payload.sid.is_none());
        assert!(payload.jti.is_none());
        assert!(payload.role.is_none());
        assert_eq!(payload.exp, NOW + 86_400);
    }

    #[test]
    fn fingerprint_mismatch_fails_verification() {
        let (codec, _) = codec_with_clock();
        let payload = codec.make_access_token_payload(
            1,
            "user",
            Uuid::new_v4(),
            Some("device-a".to_string()),
        );
        let access = codec.create_access_token(&payload).unwrap();

        assert!(codec.decode(&access.token, Some("device-a")).is_ok());
        let err = codec.decode(&access.token, Some("device-b")).unwrap_err();
        assert!(err.message.contains("fingerprint"));
        // A token minted without a fingerprint never matches a supplied one.
        let bare = codec.make_access_token_payload(1, "user", Uuid::new_v4(), None);
        let bare = codec.create_access_token(&bare).unwrap();
        assert!(codec.decode(&bare.token, Some("device-a")).is_err());
    }

    #[test]
    fn refresh_token_uses_remember_me_ttl_when_given() {
        let (codec, _) = codec_with_clock();
        let default = codec.create_refresh_token(None);
        assert_eq!(default.expires_at, NOW + 86_400);

        let remembered = codec.create_refresh_token(Some(14));
        assert_eq!(remembered.expires_at, NOW + 14 * 86_400);
    }

    #[test]
    fn garbage_input_is_rejected() {
        let (codec, _) = codec_with_clock();
        assert!(codec.verify_access_token("not-a-jwt").is_err());
    }
}
