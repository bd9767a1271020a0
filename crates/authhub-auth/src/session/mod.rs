//! Session lifecycle orchestration.

pub mod manager;

pub use manager::{REMEMBER_ME_REFRESH_TTL_DAYS, SessionManager};
