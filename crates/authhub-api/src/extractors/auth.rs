//! Per-request access guard: token verification, session liveness, and
//! permission resolution.
//!
//! Every auth failure — bad signature, wrong purpose, expired token, dead
//! session — collapses into one generic unauthorized outcome so the
//! response never tells an attacker which check failed. Permission denials
//! are different: they name the missing `resource:action` pair.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authhub_auth::permission::ResolvedPermissions;
use authhub_core::error::AppError;
use authhub_entity::user::UserWithRole;
use authhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The single message every guard failure collapses into.
const UNAUTHORIZED_MSG: &str = "Invalid authentication token or session expired";

/// Authenticated session context available in handlers.
///
/// Extraction verifies the bearer token and re-reads session liveness from
/// the store; there is no caching across requests.
#[derive(Debug, Clone)]
pub struct AuthSession(pub RequestContext);

impl std::ops::Deref for AuthSession {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(AuthSession).map_err(collapse)
    }
}

/// Authenticated caller with the full user + role projection loaded, for
/// profile-style endpoints.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Session context.
    pub ctx: RequestContext,
    /// The authenticated user with role.
    pub user: UserWithRole,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = authenticate(parts, state).await.map_err(collapse)?;
        let user = state
            .user_service
            .get_profile(&ctx)
            .await
            .map_err(collapse)?;
        Ok(CurrentUser { ctx, user })
    }
}

/// Authenticated caller with their effective permission set resolved.
///
/// Handlers call [`PermissionSet::require`] explicitly at the top of the
/// body; there is no implicit wrapping.
#[derive(Debug, Clone)]
pub struct PermissionSet {
    /// Session context.
    pub ctx: RequestContext,
    /// Effective permissions (role defaults + overrides), freshly resolved.
    pub permissions: ResolvedPermissions,
}

impl PermissionSet {
    /// Requires the given permission, denying with the named pair.
    pub fn require(
        &self,
        resource_type: &str,
        action: authhub_entity::permission::PermissionAction,
    ) -> Result<(), ApiError> {
        self.permissions
            .require(resource_type, action)
            .map_err(ApiError::from)
    }
}

impl FromRequestParts<AppState> for PermissionSet {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = authenticate(parts, state).await.map_err(collapse)?;
        let permissions = state
            .permission_service
            .resolve_for_user(ctx.user_id)
            .await
            .map_err(ApiError::from)?;
        Ok(PermissionSet { ctx, permissions })
    }
}

/// Shared guard core: bearer token → verified payload → live session.
async fn authenticate(parts: &Parts, state: &AppState) -> Result<RequestContext, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let payload = state.codec.verify_access_token(token)?;
    let session_id = payload.session_id()?;

    let session = state.session_manager.validate_session(session_id).await?;

    Ok(RequestContext::new(
        payload.user_id()?,
        session.id,
        payload.role.unwrap_or_default(),
    ))
}

/// Flattens authentication failures into the one generic unauthorized
/// outcome; other kinds (store failures) pass through untouched.
fn collapse(err: AppError) -> ApiError {
    if err.is_authentication() {
        ApiError(AppError::authentication(UNAUTHORIZED_MSG))
    } else {
        ApiError(err)
    }
}
