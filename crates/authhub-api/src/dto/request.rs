//! Request DTOs with declarative validation.

use serde::Deserialize;
use validator::Validate;

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(max = 64))]
    pub password: String,
    /// Extends the refresh-token TTL to 14 days.
    #[serde(default)]
    pub remember_me: bool,
}

/// POST /api/auth/refresh
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Valid refresh token to exchange for a new pair.
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// POST /api/users/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name (optional).
    #[validate(length(max = 32))]
    pub name: Option<String>,
    /// Email address.
    #[validate(email, length(max = 254))]
    pub email: String,
    /// Requested role name.
    #[validate(length(min = 1, max = 32))]
    pub user_role: String,
    /// New password; complexity policy is enforced by the service.
    #[validate(length(max = 64))]
    pub new_password: String,
    /// Must match `new_password`.
    #[validate(length(max = 64))]
    pub confirm_password: String,
}

/// POST /api/users/confirm-email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmEmailRequest {
    /// Confirmation token from the emailed link.
    #[validate(length(min = 1))]
    pub token: String,
}

/// PATCH /api/users/me
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 32))]
    pub name: String,
}

/// POST /api/users/me/password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password for verification.
    #[validate(length(max = 64))]
    pub current_password: String,
    /// New password.
    #[validate(length(max = 64))]
    pub new_password: String,
    /// Must match `new_password`.
    #[validate(length(max = 64))]
    pub confirm_password: String,
}

/// PUT /api/admin/users/{id}/permissions
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPermissionRequest {
    /// Permission lookup name, e.g. `"user.delete"`.
    #[validate(length(min = 1, max = 100))]
    pub permission_name: String,
    /// Grant (`true`) or revoke (`false`) the permission.
    pub granted: bool,
}
