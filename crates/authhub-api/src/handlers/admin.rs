//! Admin handlers — permission overrides and session revocation.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use authhub_entity::permission::PermissionAction;

use crate::dto::request::SetPermissionRequest;
use crate::dto::response::{MessageResponse, PermissionsResponse};
use crate::error::ApiError;
use crate::extractors::PermissionSet;
use crate::handlers::validate_request;
use crate::state::AppState;

/// GET /api/admin/users/{id}/permissions
///
/// Reads a user's effective permission set (role defaults + overrides).
pub async fn read_user_permissions(
    State(state): State<AppState>,
    guard: PermissionSet,
    Path(user_id): Path<i64>,
) -> Result<Json<PermissionsResponse>, ApiError> {
    guard.require("user", PermissionAction::Manage)?;

    let resolved = state
        .permission_service
        .read_user_permissions(user_id)
        .await?;

    Ok(Json(PermissionsResponse::from(&resolved)))
}

/// PUT /api/admin/users/{id}/permissions
///
/// Grants or revokes a single permission override by name.
pub async fn set_user_permission(
    State(state): State<AppState>,
    guard: PermissionSet,
    Path(user_id): Path<i64>,
    Json(req): Json<SetPermissionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    guard.require("user", PermissionAction::Manage)?;
    validate_request(&req)?;

    state
        .permission_service
        .set_user_permission(user_id, &req.permission_name, req.granted, guard.ctx.user_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Permission updated".to_string(),
    }))
}

/// DELETE /api/admin/sessions/{id}
///
/// Revokes an arbitrary session. Idempotent.
pub async fn revoke_session(
    State(state): State<AppState>,
    guard: PermissionSet,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    guard.require("session", PermissionAction::Manage)?;

    state.session_manager.logout(session_id).await?;

    Ok(Json(MessageResponse {
        message: "Session revoked".to_string(),
    }))
}
