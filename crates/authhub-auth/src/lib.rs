//! # authhub-auth
//!
//! Authentication and authorization primitives plus the auth flows for
//! AuthHub.
//!
//! ## Modules
//!
//! - `token` — JWT payload codec, purpose tagging, opaque refresh tokens
//! - `password` — Argon2id password hashing and policy enforcement
//! - `permission` — effective permission resolution (role defaults + overrides)
//! - `session` — the login / refresh / logout orchestration

pub mod password;
pub mod permission;
pub mod session;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use permission::ResolvedPermissions;
pub use session::SessionManager;
pub use token::{TokenCodec, TokenPair, TokenPayload, TokenPurpose};
