//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side authentication session.
///
/// Sessions are never hard-deleted: a revoked session is terminal, and an
/// expired one is excluded by query predicates rather than removed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: i64,
    /// Whether the session has been revoked (terminal).
    pub is_revoked: bool,
    /// Expiry as UTC epoch seconds.
    pub expires_at: i64,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is usable at the given instant.
    pub fn is_active(&self, now: i64) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(is_revoked: bool, expires_at: i64) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_id: 1,
            is_revoked,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn active_requires_not_revoked_and_not_expired() {
        assert!(session(false, 100).is_active(99));
        assert!(!session(false, 100).is_active(100));
        assert!(!session(true, 100).is_active(99));
    }
}
