//! Response DTOs.

use serde::{Deserialize, Serialize};

use authhub_auth::permission::ResolvedPermissions;
use authhub_auth::token::TokenPair;
use authhub_entity::user::UserWithRole;

/// The minted access token as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Compact signed token string.
    pub token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Issued-at (seconds since epoch).
    pub created_at: i64,
    /// Expiry (seconds since epoch).
    pub expires_at: i64,
}

/// The minted refresh token as returned to clients (the only time the
/// plaintext leaves the server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    /// Opaque token value.
    pub token: String,
    /// Expiry (seconds since epoch).
    pub expires_at: i64,
}

/// Login and refresh response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Short-lived access token.
    pub access_token: AccessTokenResponse,
    /// Long-lived refresh token.
    pub refresh_token: RefreshTokenResponse,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: AccessTokenResponse {
                token: pair.access_token.token,
                token_type: "bearer".to_string(),
                created_at: pair.access_token.created_at,
                expires_at: pair.access_token.expires_at,
            },
            refresh_token: RefreshTokenResponse {
                token: pair.refresh_token.token,
                expires_at: pair.refresh_token.expires_at,
            },
        }
    }
}

/// Registration response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The newly created user's id.
    pub id: i64,
    /// Registered email address.
    pub email: String,
    /// Informational message.
    pub message: String,
}

/// Role projection in profile responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    /// Role id.
    pub id: i64,
    /// Role name.
    pub name: String,
    /// Role description.
    pub description: String,
}

/// Current-user profile response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// User id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Account activation status.
    pub is_active: bool,
    /// The user's role.
    pub role: RoleResponse,
}

impl From<UserWithRole> for MeResponse {
    fn from(user: UserWithRole) -> Self {
        let role = user.role();
        Self {
            id: user.id,
            name: user.name.unwrap_or_default(),
            email: user.email,
            is_active: user.is_active,
            role: RoleResponse {
                id: role.id,
                name: role.name,
                description: role.description,
            },
        }
    }
}

/// A single effective permission entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// Resource type.
    pub resource_type: String,
    /// Allowed action.
    pub action: String,
}

/// A user's effective permission set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsResponse {
    /// All (resource_type, action) pairs the user holds.
    pub permissions: Vec<PermissionEntry>,
}

impl From<&ResolvedPermissions> for PermissionsResponse {
    fn from(resolved: &ResolvedPermissions) -> Self {
        Self {
            permissions: resolved
                .iter()
                .map(|(resource_type, action)| PermissionEntry {
                    resource_type: resource_type.to_string(),
                    action: action.to_string(),
                })
                .collect(),
        }
    }
}

/// Generic message response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Informational message.
    pub message: String,
}
