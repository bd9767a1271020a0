//! Refresh-token repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::session::RefreshContext;

/// Repository for refresh-token persistence and rotation.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new refresh-token row bound to the given session.
    pub async fn create(
        &self,
        session_id: Uuid,
        token_hash: &str,
        expires_at: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (session_id, token_hash, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(session_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create refresh token", e)
        })?;
        Ok(())
    }

    /// Look up a refresh token for rotation through the conjunctive gate.
    ///
    /// A single query must jointly validate: the token exists and matches
    /// the hash, the token is not revoked and not expired, AND the owning
    /// session is not revoked and not expired. The owning user and role are
    /// resolved eagerly because the caller mints the replacement pair
    /// immediately. A revoked session therefore kills all refresh capability
    /// even when the token row itself looks untouched.
    pub async fn get_active_for_rotation(
        &self,
        token_hash: &str,
        now: i64,
    ) -> AppResult<Option<RefreshContext>> {
        sqlx::query_as::<_, RefreshContext>(
            "SELECT s.id AS session_id, u.id AS user_id, u.is_active AS user_is_active, \
                    r.name AS role_name \
             FROM refresh_tokens rt \
             JOIN user_sessions s ON s.id = rt.session_id \
             JOIN users u ON u.id = s.user_id \
             JOIN user_roles r ON r.id = u.role_id \
             WHERE rt.token_hash = $1 \
               AND rt.is_revoked = FALSE AND rt.expires_at > $2 \
               AND s.is_revoked = FALSE AND s.expires_at > $2",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
        })
    }

    /// Rotate a refresh token: persist the replacement and revoke the
    /// consumed one in a single transaction.
    ///
    /// The revocation is the idempotent conditional flip — only a token
    /// that is neither revoked nor already expired is affected. It re-reads
    /// the consumed token's state inside the transaction, so of two
    /// concurrent refresh attempts with the same plaintext at most one
    /// commits; the loser observes `false` and must surface it as an
    /// invalid-token failure. Zero rows revoked rolls the insert back
    /// wholesale.
    pub async fn rotate(
        &self,
        session_id: Uuid,
        old_hash: &str,
        new_hash: &str,
        new_expires_at: i64,
        now: i64,
    ) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let revoked = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE \
             WHERE token_hash = $1 AND is_revoked = FALSE AND expires_at > $2",
        )
        .bind(old_hash)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;

        if revoked.rows_affected() == 0 {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back rotation", e)
            })?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO refresh_tokens (session_id, token_hash, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(session_id)
        .bind(new_hash)
        .bind(new_expires_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create refresh token", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rotation", e)
        })?;

        Ok(true)
    }
}
