//! Per-request authenticated context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller's identity, extracted from a verified access
/// token and a live session. Injected into handlers by the access guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's id.
    pub user_id: i64,
    /// The session the presented token is bound to.
    pub session_id: Uuid,
    /// Role name snapshot from the token.
    pub role: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, session_id: Uuid, role: String) -> Self {
        Self {
            user_id,
            session_id,
            role,
        }
    }
}
