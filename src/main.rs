//! MatchHub Server — realtime two-player board game service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use matchhub_core::config::AppConfig;
use matchhub_core::error::AppError;

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

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("MATCHHUB_ENV").unwrap_or_else(|_| "development".to_string());
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
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MatchHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = matchhub_database::DatabasePool::connect(&config.database).await?;
    matchhub_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(matchhub_database::repositories::UserRepository::new(
        db.pool().clone(),
    ));
    let gamer_repo = Arc::new(matchhub_database::repositories::GamerRepository::new(
        db.pool().clone(),
    ));
    let game_repo = Arc::new(matchhub_database::repositories::GameRepository::new(
        db.pool().clone(),
    ));

    // ── Step 3: Services ─────────────────────────────────────────
    let accounts = Arc::new(matchhub_auth::AccountService::new(user_repo));

    let hub = Arc::new(matchhub_realtime::GameHub::new(
        &config.realtime,
        &config.game,
        accounts,
        gamer_repo.clone(),
        game_repo,
    ));

    // ── Step 4: Shutdown channel + presence sweeper ──────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper = matchhub_realtime::PresenceSweeper::new(gamer_repo, &config.game);
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown_rx));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = matchhub_api::AppState {
        config: Arc::new(config.clone()),
        hub,
        db: db.clone(),
    };

    let app = matchhub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("MatchHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, sweeper_handle).await;

    db.close().await;
    tracing::info!("MatchHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
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
