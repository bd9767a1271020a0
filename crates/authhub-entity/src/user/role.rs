//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named role owning a set of default permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: i64,
    /// Role name identifier (unique).
    pub name: String,
    /// Human-readable role description.
    pub description: String,
}
