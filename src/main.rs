//! Pwdless Server: passwordless authentication service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use pwdless_api::{AppState, build_app};
use pwdless_auth::{
    LogMailer, LoginTokenStore, MailDispatcher, SessionCleanup, SessionManager, TokenAuth,
};
use pwdless_core::config::AppConfig;
use pwdless_core::error::AppError;
use pwdless_database::DatabasePool;
use pwdless_database::repositories::{AccountRepository, RefreshTokenRepository};
use pwdless_worker::{PurgeJob, PurgeScheduler};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PWDLESS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting pwdless v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;

    pwdless_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Stores ───────────────────────────────────────────
    let accounts = Arc::new(AccountRepository::new(db.pool().clone()));
    let refresh_tokens = Arc::new(RefreshTokenRepository::new(db.pool().clone()));

    // ── Step 3: Auth system ──────────────────────────────────────
    tracing::info!(
        algorithm = %config.auth.jwt_algorithm,
        "Initializing authentication system..."
    );
    let token_auth = Arc::new(TokenAuth::new(&config.auth));
    let mail = MailDispatcher::spawn(Arc::new(LogMailer::new(&config.email)));
    let session_manager = Arc::new(SessionManager::new(
        accounts.clone(),
        refresh_tokens.clone(),
        Arc::new(LoginTokenStore::new(&config.auth)),
        token_auth,
        mail,
        &config.auth,
    ));

    // ── Step 4: Background purge ─────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let purge = PurgeJob::new(SessionCleanup::new(refresh_tokens.clone()));
        let scheduler = PurgeScheduler::new(purge, &config.worker).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 5: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let state = AppState::new(
        Arc::new(config),
        session_manager,
        accounts,
        Arc::new(db.clone()),
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Pwdless server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Stop background tasks ────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }
    db.close().await;

    tracing::info!("Pwdless server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
