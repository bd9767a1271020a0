//! HTTP request handlers.

pub mod admin;
pub mod auth;
pub mod health;
pub mod user;

use validator::Validate;

use authhub_core::error::AppError;

use crate::error::ApiError;

/// Runs declarative DTO validation, mapping failures to a validation error.
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))
}
