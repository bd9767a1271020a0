//! Rotation-gate query projection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The eagerly-resolved result of the rotation gate lookup.
///
/// The gate query joins the presented refresh token with its session, user,
/// and role in a single statement: a row comes back only when the token and
/// its owning session are both unrevoked and unexpired, and the caller can
/// mint the replacement pair without a second round trip.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshContext {
    /// Session the presented token belongs to.
    pub session_id: Uuid,
    /// Owning user.
    pub user_id: i64,
    /// Whether the owning user account is active.
    pub user_is_active: bool,
    /// Role name snapshot for the new access token.
    pub role_name: String,
}
