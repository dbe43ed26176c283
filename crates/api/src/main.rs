use std::net::SocketAddr;
use std::sync::Arc;

use studionova_db::store::{MemoryStore, PgStore, StudioStore};
use studionova_worker::WorkerApi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studionova_api::config::ServerConfig;
use studionova_api::router::build_app_router;
use studionova_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "studionova_api=debug,studionova_worker=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        worker_url = %config.worker.base_url,
        worker_root = %config.worker_root.display(),
        "Loaded server configuration"
    );

    // --- Store ---
    let store: Arc<dyn StudioStore> = match &config.database_url {
        Some(database_url) => {
            let pool = studionova_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            studionova_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            studionova_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let owner = store
        .ensure_user(&config.dev_user_email)
        .await
        .expect("Failed to seed dev user");
    tracing::info!(user_id = owner.id, email = %owner.email, "Dev user ready");

    // --- Worker client ---
    let worker = WorkerApi::new(&config.worker).expect("Failed to build worker HTTP client");

    // --- App state ---
    let state = AppState {
        store,
        worker: Arc::new(worker),
        config: Arc::new(config.clone()),
        owner_id: owner.id,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
