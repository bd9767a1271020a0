//! User handlers — registration, activation, profile, password, deletion.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use authhub_core::error::AppError;

use crate::dto::request::{
    ChangePasswordRequest, ConfirmEmailRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::dto::response::{MeResponse, MessageResponse, RegisterResponse};
use crate::error::ApiError;
use crate::extractors::{AuthSession, CurrentUser, PermissionSet};
use crate::handlers::validate_request;
use crate::state::AppState;

/// POST /api/users/register
///
/// Creates an inactive account and issues an email-confirmation token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    validate_request(&req)?;

    if req.new_password != req.confirm_password {
        return Err(ApiError(AppError::validation("Passwords do not match")));
    }

    let user_id = state
        .user_service
        .register(
            &req.email,
            &req.new_password,
            &req.user_role,
            req.name.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user_id,
            email: req.email,
            message: "Confirmation email sent".to_string(),
        }),
    ))
}

/// POST /api/users/confirm-email
///
/// Activates the account named by the confirmation token. Confirming twice
/// is a conflict.
pub async fn confirm_email(
    State(state): State<AppState>,
    Json(req): Json<ConfirmEmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_request(&req)?;

    state.user_service.confirm_email(&req.token).await?;

    Ok(Json(MessageResponse {
        message: "Account activated".to_string(),
    }))
}

/// GET /api/users/me
pub async fn me(current: CurrentUser) -> Json<MeResponse> {
    Json(current.user.into())
}

/// PATCH /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_request(&req)?;

    state.user_service.update_profile(&auth, &req.name).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated".to_string(),
    }))
}

/// POST /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_request(&req)?;

    if req.new_password != req.confirm_password {
        return Err(ApiError(AppError::validation("Passwords do not match")));
    }

    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}

/// DELETE /api/users/{id}
///
/// Deactivates the account. Self-deletion needs no permission; deleting
/// anyone else requires `user:delete`. Admin accounts can never be deleted.
pub async fn delete_user(
    State(state): State<AppState>,
    guard: PermissionSet,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .delete(&guard.ctx, user_id, &guard.permissions)
        .await?;

    let message = if user_id == guard.ctx.user_id {
        "Your account has been deleted"
    } else {
        "User deleted successfully"
    };

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}
