//! # authhub-core
//!
//! Core crate for AuthHub. Contains configuration schemas, the clock
//! abstraction used for all expiry math, and the unified error system.
//!
//! This crate has **no** internal dependencies on other AuthHub crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;

pub use clock::{Clock, SystemClock};
pub use error::AppError;
pub use result::AppResult;
