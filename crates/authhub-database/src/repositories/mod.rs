//! Concrete repository implementations.
//!
//! Each repository is a plain struct over `PgPool`. Queries that filter on
//! expiry take an explicit `now` (UTC epoch seconds) supplied by the caller
//! so that all time comparisons flow through the injected clock.

pub mod permission;
pub mod refresh_token;
pub mod role;
pub mod session;
pub mod user;

pub use permission::PermissionRepository;
pub use refresh_token::RefreshTokenRepository;
pub use role::RoleRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
