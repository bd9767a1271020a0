//! AuthHub Server — authentication and authorization backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authhub_auth::password::{PasswordHasher, PasswordValidator};
use authhub_auth::session::SessionManager;
use authhub_auth::token::TokenCodec;
use authhub_core::clock::{Clock, SystemClock};
use authhub_core::config::AppConfig;
use authhub_core::error::AppError;
use authhub_database::DatabasePool;
use authhub_database::repositories::permission::PermissionRepository;
use authhub_database::repositories::refresh_token::RefreshTokenRepository;
use authhub_database::repositories::role::RoleRepository;
use authhub_database::repositories::session::SessionRepository;
use authhub_database::repositories::user::UserRepository;
use authhub_service::notifier::Notifier;
use authhub_service::permission::PermissionService;
use authhub_service::user::UserService;

#[tokio::main]
async fn main() {
    let env = std::env::var("AUTHHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    authhub_database::migration::run_migrations(db.pool()).await?;

    // ── Repositories ─────────────────────────────────────────────
    let pool = db.pool().clone();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let role_repo = Arc::new(RoleRepository::new(pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(pool.clone()));
    let refresh_repo = Arc::new(RefreshTokenRepository::new(pool.clone()));
    let permission_repo = Arc::new(PermissionRepository::new(pool.clone()));

    // ── Auth primitives ──────────────────────────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let codec = Arc::new(TokenCodec::new(&config.auth, Arc::clone(&clock)));
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));

    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_repo),
        Arc::clone(&refresh_repo),
        Arc::clone(&codec),
        Arc::clone(&hasher),
        Arc::clone(&clock),
    ));

    // ── Services ─────────────────────────────────────────────────
    let notifier = Notifier::new(Arc::clone(&codec));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&hasher),
        Arc::clone(&validator),
        Arc::clone(&codec),
        notifier,
    ));
    let permission_service = Arc::new(PermissionService::new(
        Arc::clone(&permission_repo),
        Arc::clone(&user_repo),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let state = authhub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: pool,
        codec,
        session_manager,
        user_service,
        permission_service,
    };

    let app = authhub_api::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("AuthHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
