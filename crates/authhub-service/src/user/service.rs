//! User account operations — registration, activation, profile, password,
//! deletion.

use std::sync::Arc;

use tracing::info;

use authhub_auth::password::{PasswordHasher, PasswordValidator};
use authhub_auth::permission::ResolvedPermissions;
use authhub_auth::token::TokenCodec;
use authhub_core::error::AppError;
use authhub_database::repositories::role::RoleRepository;
use authhub_database::repositories::user::UserRepository;
use authhub_entity::permission::PermissionAction;
use authhub_entity::user::UserWithRole;

use crate::context::RequestContext;
use crate::notifier::Notifier;

/// Handles user account lifecycle and self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Role repository.
    role_repo: Arc<RoleRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Token codec for email confirmation.
    codec: Arc<TokenCodec>,
    /// Confirmation notifier.
    notifier: Notifier,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        codec: Arc<TokenCodec>,
        notifier: Notifier,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            hasher,
            validator,
            codec,
            notifier,
        }
    }

    /// Registers a new user account.
    ///
    /// The account starts inactive; a confirmation token is issued through
    /// the notifier. Returns the new user's id.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role_name: &str,
        name: Option<&str>,
    ) -> Result<i64, AppError> {
        self.validator.validate(password)?;

        let role = self
            .role_repo
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role '{role_name}' does not exist")))?;

        let password_hash = self.hasher.hash_password(password)?;
        let user_id = self
            .user_repo
            .create(email, &password_hash, role.id, name)
            .await?;

        self.notifier.send_email_confirmation(user_id, email)?;

        info!(user_id, role = %role.name, "User registered");
        Ok(user_id)
    }

    /// Activates an account from an email-confirmation token.
    ///
    /// Confirming an already-active account is a conflict.
    pub async fn confirm_email(&self, token: &str) -> Result<(), AppError> {
        let user_id = self.codec.verify_email_confirmation_token(token)?;
        self.user_repo.mark_active(user_id).await?;
        info!(user_id, "Email confirmed, account activated");
        Ok(())
    }

    /// Loads the current user's full profile with role.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<UserWithRole, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's display name.
    pub async fn update_profile(&self, ctx: &RequestContext, name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if !self.user_repo.update_name(ctx.user_id, name).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = ctx.user_id, "Profile updated");
        Ok(())
    }

    /// Changes the current user's password.
    ///
    /// Verifies the current password first; the new one must satisfy the
    /// policy and differ from the old.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        self.hasher
            .verify_password(current_password, &user.password_hash)
            .map_err(|e| {
                if e.is_authentication() {
                    AppError::authentication("Current password is incorrect")
                } else {
                    e
                }
            })?;

        self.validator.validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(ctx.user_id, &password_hash)
            .await?;

        info!(user_id = ctx.user_id, "Password changed");
        Ok(())
    }

    /// Deactivates a user account (soft delete).
    ///
    /// Self-deletion is always allowed; deleting someone else requires the
    /// `user:delete` permission. Admin accounts can never be deactivated —
    /// the repository enforces that rule regardless of caller.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        user_id: i64,
        permissions: &ResolvedPermissions,
    ) -> Result<(), AppError> {
        if user_id != ctx.user_id {
            permissions.require("user", PermissionAction::Delete)?;
        }
        self.user_repo.mark_inactive(user_id).await?;
        info!(user_id, deleted_by = ctx.user_id, "User deactivated");
        Ok(())
    }
}
