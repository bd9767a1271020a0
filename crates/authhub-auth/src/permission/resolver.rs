//! Effective permission set: role defaults overlaid with per-user overrides.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use authhub_core::error::AppError;
use authhub_entity::permission::{PermissionAction, PermissionOverride, RoleDefault};

/// A user's resolved permission set.
///
/// Pure function of (role defaults, overrides); backed by ordered
/// collections so the result is deterministic regardless of input order.
/// Resource-type keys are normalized to lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPermissions {
    permissions: BTreeMap<String, BTreeSet<PermissionAction>>,
}

impl ResolvedPermissions {
    /// Overlays per-user overrides onto role defaults.
    ///
    /// A `granted = true` override adds the action even if the role lacks
    /// it; `granted = false` removes it even if the role grants it. The
    /// store keeps at most one override per (user, permission); if duplicate
    /// rows were ever supplied anyway, the last one wins.
    pub fn resolve(defaults: &[RoleDefault], overrides: &[PermissionOverride]) -> Self {
        let mut permissions: BTreeMap<String, BTreeSet<PermissionAction>> = BTreeMap::new();

        for default in defaults {
            permissions
                .entry(default.resource_type.to_lowercase())
                .or_default()
                .insert(default.action);
        }

        for over in overrides {
            let entry = permissions.entry(over.resource_type.to_lowercase()).or_default();
            if over.granted {
                entry.insert(over.action);
            } else {
                entry.remove(&over.action);
            }
        }

        Self { permissions }
    }

    /// Whether the set contains `action` on `resource_type`
    /// (case-insensitive resource match).
    pub fn has_permission(&self, resource_type: &str, action: PermissionAction) -> bool {
        self.permissions
            .get(&resource_type.to_lowercase())
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Requires `action` on `resource_type`, naming the missing pair on
    /// denial. Unlike authentication failures, the required permission is
    /// safe to reveal.
    pub fn require(&self, resource_type: &str, action: PermissionAction) -> Result<(), AppError> {
        if self.has_permission(resource_type, action) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Access denied. Required: {resource_type}:{action} permission"
            )))
        }
    }

    /// Iterates over all (resource_type, action) pairs in the set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PermissionAction)> {
        self.permissions
            .iter()
            .flat_map(|(resource, actions)| actions.iter().map(move |a| (resource.as_str(), *a)))
    }

    /// Number of (resource_type, action) pairs in the set.
    pub fn len(&self) -> usize {
        self.permissions.values().map(BTreeSet::len).sum()
    }

    /// Whether the set grants nothing at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default(resource: &str, action: PermissionAction) -> RoleDefault {
        RoleDefault {
            resource_type: resource.to_string(),
            action,
        }
    }

    fn over(resource: &str, action: PermissionAction, granted: bool) -> PermissionOverride {
        PermissionOverride {
            resource_type: resource.to_string(),
            action,
            granted,
        }
    }

    #[test]
    fn grant_override_adds_missing_action() {
        let resolved = ResolvedPermissions::resolve(
            &[default("order", PermissionAction::Read)],
            &[over("order", PermissionAction::Delete, true)],
        );
        assert!(resolved.has_permission("order", PermissionAction::Read));
        assert!(resolved.has_permission("order", PermissionAction::Delete));
    }

    #[test]
    fn revoke_override_removes_role_default() {
        let resolved = ResolvedPermissions::resolve(
            &[default("order", PermissionAction::Read)],
            &[over("order", PermissionAction::Read, false)],
        );
        assert!(!resolved.has_permission("order", PermissionAction::Read));
    }

    #[test]
    fn absent_override_leaves_role_default() {
        let resolved = ResolvedPermissions::resolve(
            &[default("order", PermissionAction::Read)],
            &[],
        );
        assert!(resolved.has_permission("order", PermissionAction::Read));
        assert!(!resolved.has_permission("order", PermissionAction::Delete));
    }

    #[test]
    fn revoke_on_unknown_resource_is_a_no_op() {
        let resolved = ResolvedPermissions::resolve(
            &[default("order", PermissionAction::Read)],
            &[over("invoice", PermissionAction::Read, false)],
        );
        assert!(resolved.has_permission("order", PermissionAction::Read));
        assert!(!resolved.has_permission("invoice", PermissionAction::Read));
    }

    #[test]
    fn resource_match_is_case_insensitive() {
        let resolved = ResolvedPermissions::resolve(
            &[default("Order", PermissionAction::Read)],
            &[],
        );
        assert!(resolved.has_permission("ORDER", PermissionAction::Read));
        assert!(resolved.has_permission("order", PermissionAction::Read));
    }

    #[test]
    fn result_is_independent_of_input_order() {
        let defaults = [
            default("order", PermissionAction::Read),
            default("invoice", PermissionAction::Update),
        ];
        let overrides = [
            over("order", PermissionAction::Delete, true),
            over("invoice", PermissionAction::Update, false),
        ];

        let forward = ResolvedPermissions::resolve(&defaults, &overrides);
        let mut reversed_defaults = defaults.to_vec();
        reversed_defaults.reverse();
        let backward = ResolvedPermissions::resolve(&reversed_defaults, &overrides);

        assert_eq!(forward, backward);
    }

    #[test]
    fn duplicate_overrides_last_write_wins() {
        let resolved = ResolvedPermissions::resolve(
            &[],
            &[
                over("order", PermissionAction::Read, true),
                over("order", PermissionAction::Read, false),
            ],
        );
        assert!(!resolved.has_permission("order", PermissionAction::Read));
    }

    #[test]
    fn require_names_the_missing_pair() {
        let resolved = ResolvedPermissions::resolve(&[], &[]);
        let err = resolved
            .require("user", PermissionAction::Delete)
            .unwrap_err();
        assert!(err.message.contains("user:delete"));
        assert!(resolved.is_empty());
    }

    #[test]
    fn iter_flattens_pairs() {
        let resolved = ResolvedPermissions::resolve(
            &[
                default("order", PermissionAction::Read),
                default("order", PermissionAction::Update),
            ],
            &[],
        );
        let pairs: Vec<_> = resolved.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(resolved.len(), 2);
        assert!(pairs.contains(&("order", PermissionAction::Read)));
    }
}
