//! Permission repository implementation.

use sqlx::PgPool;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::permission::{Permission, PermissionOverride, RoleDefault};

/// Repository for permission lookups and per-user overrides.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the role-default permissions of the given user's role.
    pub async fn role_defaults(&self, user_id: i64) -> AppResult<Vec<RoleDefault>> {
        sqlx::query_as::<_, RoleDefault>(
            "SELECT p.resource_type, p.action \
             FROM users u \
             JOIN role_permissions rp ON rp.role_id = u.role_id \
             JOIN permissions p ON p.id = rp.permission_id \
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load role permissions", e)
        })
    }

    /// Load the per-user permission overrides of the given user.
    pub async fn overrides(&self, user_id: i64) -> AppResult<Vec<PermissionOverride>> {
        sqlx::query_as::<_, PermissionOverride>(
            "SELECT p.resource_type, p.action, up.granted \
             FROM user_permissions up \
             JOIN permissions p ON p.id = up.permission_id \
             WHERE up.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load user overrides", e)
        })
    }

    /// Find a permission by its unique lookup name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT id, name, description, resource_type, action FROM permissions WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find permission by name", e)
        })
    }

    /// Grant or revoke a permission for a user.
    ///
    /// Upserts on the (user, permission) key, so repeated writes replace the
    /// previous override instead of accumulating conflicting rows.
    pub async fn set_override(
        &self,
        user_id: i64,
        permission_id: i64,
        granted: bool,
        granted_by: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_permissions (user_id, permission_id, granted, granted_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, permission_id) \
             DO UPDATE SET granted = EXCLUDED.granted, granted_by = EXCLUDED.granted_by",
        )
        .bind(user_id)
        .bind(permission_id)
        .bind(granted)
        .bind(granted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set user permission", e)
        })?;
        Ok(())
    }
}
