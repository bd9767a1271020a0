//! Permission action enumeration.

use serde::{Deserialize, Serialize};

use authhub_core::AppError;

/// An action that can be performed on a resource type.
///
/// CRUD operations plus a management capability for admin-style access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permission_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    /// Create a resource.
    Create,
    /// Read a resource.
    Read,
    /// Update a resource.
    Update,
    /// Delete a resource.
    Delete,
    /// Full management of a resource type.
    Manage,
}

impl PermissionAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Manage => "manage",
        }
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "manage" => Ok(Self::Manage),
            _ => Err(AppError::validation(format!("Invalid action: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_through_strings() {
        for action in [
            PermissionAction::Create,
            PermissionAction::Read,
            PermissionAction::Update,
            PermissionAction::Delete,
            PermissionAction::Manage,
        ] {
            assert_eq!(PermissionAction::from_str(action.as_str()).unwrap(), action);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            PermissionAction::from_str("DELETE").unwrap(),
            PermissionAction::Delete
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(PermissionAction::from_str("destroy").is_err());
    }
}
