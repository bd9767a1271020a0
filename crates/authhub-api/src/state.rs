//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use authhub_auth::session::SessionManager;
use authhub_auth::token::TokenCodec;
use authhub_core::config::AppConfig;
use authhub_service::permission::PermissionService;
use authhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Token minting and verification.
    pub codec: Arc<TokenCodec>,
    /// Login / refresh / logout orchestration.
    pub session_manager: Arc<SessionManager>,
    /// User account service.
    pub user_service: Arc<UserService>,
    /// Permission resolution and override management.
    pub permission_service: Arc<PermissionService>,
}
