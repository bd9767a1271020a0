//! Permission entities and query projections.

pub mod action;
pub mod model;

pub use action::PermissionAction;
pub use model::{Permission, PermissionOverride, RoleDefault};
