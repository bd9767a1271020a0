//! User repository implementation.

use sqlx::PgPool;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::user::UserWithRole;

/// Columns selected for the user + role projection.
const USER_WITH_ROLE: &str = "SELECT u.id, u.email, u.name, u.password_hash, u.is_active, \
     u.role_id, r.name AS role_name, r.description AS role_description \
     FROM users u JOIN user_roles r ON r.id = u.role_id";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user account. Accounts start inactive.
    ///
    /// Returns the new user's id, or a conflict error if the email is
    /// already registered.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role_id: i64,
        name: Option<&str>,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, password_hash, role_id, name) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .bind(role_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("User with email '{email}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Find a user by email (case-insensitive), with role loaded.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserWithRole>> {
        sqlx::query_as::<_, UserWithRole>(&format!(
            "{USER_WITH_ROLE} WHERE LOWER(u.email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }

    /// Find a user by primary key, with role loaded.
    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<UserWithRole>> {
        sqlx::query_as::<_, UserWithRole>(&format!("{USER_WITH_ROLE} WHERE u.id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Activate a user account (email confirmation).
    ///
    /// Fails with not-found if the user does not exist and with a conflict
    /// if the account is already active.
    pub async fn mark_active(&self, user_id: i64) -> AppResult<()> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{user_id}' does not exist")))?;

        if user.is_active {
            return Err(AppError::conflict(format!(
                "User with id '{user_id}' already activated"
            )));
        }

        sqlx::query("UPDATE users SET is_active = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate user", e))?;
        Ok(())
    }

    /// Deactivate a user account (soft delete).
    ///
    /// A user holding the distinguished `admin` role may never be
    /// deactivated.
    pub async fn mark_inactive(&self, user_id: i64) -> AppResult<()> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{user_id}' does not exist")))?;

        if user.is_admin() {
            return Err(AppError::conflict("Admin accounts cannot be deleted"));
        }

        sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to deactivate user", e)
            })?;
        Ok(())
    }

    /// Update a user's display name. Returns whether a row was changed.
    pub async fn update_name(&self, user_id: i64, name: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update name", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a user's password hash. Returns whether a row was changed.
    pub async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
