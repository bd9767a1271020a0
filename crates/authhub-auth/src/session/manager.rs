//! Auth flow orchestration — login, refresh rotation, logout.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use authhub_core::clock::Clock;
use authhub_core::error::AppError;
use authhub_database::repositories::refresh_token::RefreshTokenRepository;
use authhub_database::repositories::session::SessionRepository;
use authhub_database::repositories::user::UserRepository;
use authhub_entity::session::Session;

use crate::password::PasswordHasher;
use crate::token::opaque::sha256_hex;
use crate::token::{TokenCodec, TokenPair};

/// Refresh-token TTL applied when the user asks to be remembered.
/// A login-time-only choice: rotation always resets to the configured
/// default.
pub const REMEMBER_ME_REFRESH_TTL_DAYS: i64 = 14;

/// Orchestrates the authentication protocol over the token codec, password
/// hasher, and session/refresh stores. Holds no state of its own.
#[derive(Clone)]
pub struct SessionManager {
    /// User lookups.
    user_repo: Arc<UserRepository>,
    /// Session persistence.
    session_repo: Arc<SessionRepository>,
    /// Refresh-token persistence and rotation.
    refresh_repo: Arc<RefreshTokenRepository>,
    /// Token minting and verification.
    codec: Arc<TokenCodec>,
    /// Password verification.
    hasher: Arc<PasswordHasher>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("codec", &self.codec)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        user_repo: Arc<UserRepository>,
        session_repo: Arc<SessionRepository>,
        refresh_repo: Arc<RefreshTokenRepository>,
        codec: Arc<TokenCodec>,
        hasher: Arc<PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            refresh_repo,
            codec,
            hasher,
            clock,
        }
    }

    /// Performs the complete login flow.
    ///
    /// Absent user, inactive account, and wrong password all collapse into
    /// the same generic authentication failure so the response never reveals
    /// which check failed. On success a session is created with the chosen
    /// TTL, a pair is minted against it, and the refresh token is persisted
    /// hashed — its plaintext is returned exactly this once.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<TokenPair, AppError> {
        let (user_id, role_name) = self.authenticate(email, password).await?;

        let refresh_ttl_days = if remember_me {
            REMEMBER_ME_REFRESH_TTL_DAYS
        } else {
            self.codec.refresh_token_ttl_days()
        };

        let session_expires_at = self.clock.now_ts() + refresh_ttl_days * 86_400;
        let session_id = self
            .session_repo
            .create(user_id, session_expires_at)
            .await?;

        let pair = self
            .codec
            .token_pair(user_id, &role_name, session_id, Some(refresh_ttl_days))?;

        self.refresh_repo
            .create(
                session_id,
                &sha256_hex(&pair.refresh_token.token),
                pair.refresh_token.expires_at,
            )
            .await?;

        info!(user_id, session_id = %session_id, remember_me, "Login successful");

        Ok(pair)
    }

    /// Exchanges a refresh token for a new pair, rotating the old token.
    ///
    /// The conjunctive gate validates token and owning session jointly; any
    /// failing condition surfaces as the same generic failure. The new pair
    /// is bound to the *same* session — the session's TTL is preserved and
    /// the replacement refresh token gets the configured default TTL. The
    /// consumed token is revoked in the same transaction that persists its
    /// replacement, so a concurrent reuse of the old plaintext loses
    /// cleanly.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let now = self.clock.now_ts();
        let old_hash = sha256_hex(refresh_token);

        let ctx = self
            .refresh_repo
            .get_active_for_rotation(&old_hash, now)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid or expired refresh token"))?;

        if !ctx.user_is_active {
            debug!(user_id = ctx.user_id, "Refresh rejected for inactive user");
            return Err(AppError::authentication("Invalid or expired refresh token"));
        }

        let pair = self
            .codec
            .token_pair(ctx.user_id, &ctx.role_name, ctx.session_id, None)?;

        let rotated = self
            .refresh_repo
            .rotate(
                ctx.session_id,
                &old_hash,
                &sha256_hex(&pair.refresh_token.token),
                pair.refresh_token.expires_at,
                now,
            )
            .await?;

        if !rotated {
            // Lost a race: the presented token was consumed concurrently.
            return Err(AppError::authentication("Invalid or expired refresh token"));
        }

        info!(user_id = ctx.user_id, session_id = %ctx.session_id, "Token refreshed");

        Ok(pair)
    }

    /// Revokes a session. Idempotent: revoking an already-revoked or
    /// missing session is not an error.
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        let revoked = self.session_repo.revoke(session_id).await?;
        info!(session_id = %session_id, revoked, "Logout processed");
        Ok(())
    }

    /// Re-reads session liveness for the per-request guard.
    pub async fn validate_session(&self, session_id: Uuid) -> Result<Session, AppError> {
        self.session_repo
            .get_active(session_id, self.clock.now_ts())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid authentication token or session expired"))
    }

    /// Validates credentials, returning the user id and role-name snapshot.
    async fn authenticate(&self, email: &str, password: &str) -> Result<(i64, String), AppError> {
        let invalid = || AppError::authentication("Invalid credentials");

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                debug!("Login attempt for unknown email");
                invalid()
            })?;

        if !user.is_active {
            debug!(user_id = user.id, "Login attempt for inactive account");
            return Err(invalid());
        }

        self.hasher
            .verify_password(password, &user.password_hash)
            .map_err(|e| if e.is_authentication() { invalid() } else { e })?;

        Ok((user.id, user.role_name))
    }
}
