//! # authhub-api
//!
//! HTTP surface of AuthHub: axum handlers, the per-request access guard
//! (extractors), request/response DTOs, error → status mapping, and the
//! router.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
