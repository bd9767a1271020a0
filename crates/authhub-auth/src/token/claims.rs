//! Signed token claim set and purpose tagging.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authhub_core::AppError;

/// The purpose a token was minted for.
///
/// Carried in every payload so a token minted for one use is never accepted
/// for another (an email-confirmation token is not a bearer credential).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Short-lived API bearer credential.
    Access,
    /// Refresh marker (reserved; opaque refresh tokens are not JWTs).
    Refresh,
    /// Account activation via emailed link.
    EmailConfirmation,
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
            Self::EmailConfirmation => write!(f, "email_confirmation"),
        }
    }
}

/// The signed claim set carried by every AuthHub JWT.
///
/// Optional claims are omitted from the encoded token entirely; an
/// email-confirmation token carries only `sub`, `iat`, `exp`, and `purpose`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject — the user id as a string.
    pub sub: String,
    /// Session id the token is bound to (access tokens only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id, fresh per mint (access tokens only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Role name snapshot at mint time (access tokens only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// What this token may be used for.
    pub purpose: TokenPurpose,
    /// Optional caller-supplied binding value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl TokenPayload {
    /// Parse the subject claim as a user id.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::authentication("Invalid subject claim"))
    }

    /// Parse the session claim as a session id.
    pub fn session_id(&self) -> Result<Uuid, AppError> {
        self.sid
            .as_deref()
            .and_then(|sid| Uuid::parse_str(sid).ok())
            .ok_or_else(|| AppError::authentication("Invalid session claim"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TokenPayload {
        TokenPayload {
            sub: "42".to_string(),
            sid: Some(Uuid::nil().to_string()),
            iat: 0,
            exp: 60,
            jti: None,
            role: None,
            purpose: TokenPurpose::Access,
            fingerprint: None,
        }
    }

    #[test]
    fn user_id_parses_subject() {
        assert_eq!(payload().user_id().unwrap(), 42);
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let mut p = payload();
        p.sub = "not-a-number".to_string();
        assert!(p.user_id().is_err());
    }

    #[test]
    fn missing_session_claim_is_rejected() {
        let mut p = payload();
        p.sid = None;
        assert!(p.session_id().is_err());
    }

    #[test]
    fn optional_claims_are_omitted_when_absent() {
        let mut p = payload();
        p.sid = None;
        p.fingerprint = None;
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("sid"));
        assert!(!json.contains("fingerprint"));
        assert!(json.contains("\"purpose\":\"access\""));
    }
}
