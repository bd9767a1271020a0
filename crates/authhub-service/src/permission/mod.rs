//! Permission management operations.

pub mod service;

pub use service::PermissionService;
