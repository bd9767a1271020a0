//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Email confirmation token TTL in days.
    #[serde(default = "default_email_confirmation_ttl")]
    pub email_confirmation_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            email_confirmation_ttl_days: default_email_confirmation_ttl(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    1200
}

fn default_refresh_ttl() -> u64 {
    1
}

fn default_email_confirmation_ttl() -> u64 {
    1
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_ttls() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl_seconds, 1200);
        assert_eq!(config.refresh_token_ttl_days, 1);
        assert_eq!(config.email_confirmation_ttl_days, 1);
        assert_eq!(config.password_min_length, 8);
        assert_eq!(config.password_max_length, 64);
    }
}
