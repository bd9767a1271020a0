//! Route definitions for the AuthHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User registration and self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::user::register))
        .route("/users/confirm-email", post(handlers::user::confirm_email))
        .route("/users/me", get(handlers::user::me))
        .route("/users/me", patch(handlers::user::update_profile))
        .route("/users/me/password", post(handlers::user::change_password))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Admin endpoints: permission overrides, session revocation.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users/{id}/permissions",
            get(handlers::admin::read_user_permissions),
        )
        .route(
            "/admin/users/{id}/permissions",
            put(handlers::admin::set_user_permission),
        )
        .route(
            "/admin/sessions/{id}",
            delete(handlers::admin::revoke_session),
        )
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
