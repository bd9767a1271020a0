//! Permission entity and repository query projections.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::action::PermissionAction;

/// A named permission: a (resource_type, action) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: i64,
    /// Lookup name (unique), e.g. `"user.delete"`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Resource type the permission applies to.
    pub resource_type: String,
    /// Action allowed on the resource.
    pub action: PermissionAction,
}

/// One role-default permission row: the role grants `action` on
/// `resource_type`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleDefault {
    /// Resource type.
    pub resource_type: String,
    /// Granted action.
    pub action: PermissionAction,
}

/// A per-user override row layered on top of role defaults.
///
/// `granted = true` adds the permission even if the role lacks it;
/// `granted = false` removes it even if the role grants it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermissionOverride {
    /// Resource type.
    pub resource_type: String,
    /// Overridden action.
    pub action: PermissionAction,
    /// Whether the override grants or revokes the permission.
    pub granted: bool,
}
