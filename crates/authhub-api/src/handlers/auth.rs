//! Auth handlers — login, refresh, logout.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::AuthSession;
use crate::handlers::validate_request;
use crate::state::AppState;

/// POST /api/auth/login
///
/// Authenticates with email and password; returns an access + refresh pair.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_request(&req)?;

    let pair = state
        .session_manager
        .login(&req.email, &req.password, req.remember_me)
        .await?;

    Ok(Json(pair.into()))
}

/// POST /api/auth/refresh
///
/// Exchanges a refresh token for a new pair; the presented token is dead
/// afterwards whether or not it leaks later.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_request(&req)?;

    let pair = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(pair.into()))
}

/// POST /api/auth/logout
///
/// Revokes the caller's session. Idempotent.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<MessageResponse>, ApiError> {
    state.session_manager.logout(auth.session_id).await?;

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}
