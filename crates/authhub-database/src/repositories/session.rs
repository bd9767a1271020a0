//! Session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::session::Session;

/// Repository for session lifecycle operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new session. Returns the generated session id.
    pub async fn create(&self, user_id: i64, expires_at: i64) -> AppResult<Uuid> {
        let session_id = Uuid::new_v4();
        sqlx::query("INSERT INTO user_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;
        Ok(session_id)
    }

    /// Find a session that is neither revoked nor expired at `now`.
    pub async fn get_active(&self, session_id: Uuid, now: i64) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT id, user_id, is_revoked, expires_at, created_at FROM user_sessions \
             WHERE id = $1 AND is_revoked = FALSE AND expires_at > $2",
        )
        .bind(session_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find active session", e))
    }

    /// Revoke a session. Idempotent: revoking an already-revoked or missing
    /// session returns `false` rather than an error.
    pub async fn revoke(&self, session_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE WHERE id = $1 AND is_revoked = FALSE",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke session", e))?;

        Ok(result.rows_affected() > 0)
    }
}
