//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::Role;

/// A user joined with its role, as returned by repository lookups.
///
/// Flat projection of `users JOIN user_roles` with role columns aliased.
/// Accounts start inactive and are activated by email confirmation;
/// deactivation (`is_active = false`) is the soft-delete mechanism — rows
/// are never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserWithRole {
    /// Unique user identifier.
    pub id: i64,
    /// Email address (unique, login identifier).
    pub email: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account is active (confirmed and not deleted).
    pub is_active: bool,
    /// Role identifier.
    pub role_id: i64,
    /// Role name (e.g. `"admin"`, `"user"`).
    pub role_name: String,
    /// Role description.
    pub role_description: String,
}

impl UserWithRole {
    /// Builds the role projection carried by this row.
    pub fn role(&self) -> Role {
        Role {
            id: self.role_id,
            name: self.role_name.clone(),
            description: self.role_description.clone(),
        }
    }

    /// Whether this user holds the distinguished admin role.
    pub fn is_admin(&self) -> bool {
        self.role_name == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role_name: &str) -> UserWithRole {
        UserWithRole {
            id: 1,
            email: "a@example.com".to_string(),
            name: None,
            password_hash: "$argon2id$stub".to_string(),
            is_active: true,
            role_id: 1,
            role_name: role_name.to_string(),
            role_description: "Role".to_string(),
        }
    }

    #[test]
    fn only_the_admin_role_is_admin() {
        assert!(user("admin").is_admin());
        assert!(!user("user").is_admin());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&user("user")).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
