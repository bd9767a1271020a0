//! Permission resolution and admin override management.

use std::sync::Arc;

use tracing::info;

use authhub_auth::permission::ResolvedPermissions;
use authhub_core::error::AppError;
use authhub_database::repositories::permission::PermissionRepository;
use authhub_database::repositories::user::UserRepository;

/// Resolves effective permissions and manages per-user overrides.
#[derive(Debug, Clone)]
pub struct PermissionService {
    /// Permission repository.
    permission_repo: Arc<PermissionRepository>,
    /// User repository (existence checks).
    user_repo: Arc<UserRepository>,
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(permission_repo: Arc<PermissionRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            permission_repo,
            user_repo,
        }
    }

    /// Computes the user's effective permission set: role defaults overlaid
    /// with individual overrides. Re-read from the store on every call —
    /// nothing is cached across requests.
    pub async fn resolve_for_user(&self, user_id: i64) -> Result<ResolvedPermissions, AppError> {
        let defaults = self.permission_repo.role_defaults(user_id).await?;
        let overrides = self.permission_repo.overrides(user_id).await?;
        Ok(ResolvedPermissions::resolve(&defaults, &overrides))
    }

    /// Reads a user's effective permissions, checking the user exists.
    pub async fn read_user_permissions(
        &self,
        user_id: i64,
    ) -> Result<ResolvedPermissions, AppError> {
        self.check_user_exists(user_id).await?;
        self.resolve_for_user(user_id).await
    }

    /// Grants or revokes a permission override for a user, by permission
    /// name.
    pub async fn set_user_permission(
        &self,
        user_id: i64,
        permission_name: &str,
        granted: bool,
        granted_by: i64,
    ) -> Result<(), AppError> {
        self.check_user_exists(user_id).await?;

        let permission = self
            .permission_repo
            .find_by_name(permission_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Permission '{permission_name}' not found"))
            })?;

        self.permission_repo
            .set_override(user_id, permission.id, granted, granted_by)
            .await?;

        info!(
            user_id,
            permission = %permission.name,
            granted,
            granted_by,
            "User permission override set"
        );
        Ok(())
    }

    /// Fails with a domain not-found if the user does not exist.
    async fn check_user_exists(&self, user_id: i64) -> Result<(), AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{user_id}' does not exist")))?;
        Ok(())
    }
}
