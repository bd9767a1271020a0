//! Access-guard extractors.

pub mod auth;

pub use auth::{AuthSession, CurrentUser, PermissionSet};
