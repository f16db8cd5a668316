use std::sync::Arc;

use notes_api::{
    config,
    repository::{MongoRepository, NoteRepository},
    service::NoteService,
};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Environment setup, a missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment overrides from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to read .env file: {e}"),
    }

    // Fetch env variables
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    // Storage connection failures are logged, requests fail until it is reachable
    let repo: Arc<dyn NoteRepository> = Arc::new(MongoRepository::connect(&cfg).await);

    // Service creation
    let service = Arc::new(NoteService::new(repo));

    let router = notes_api::router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Server running on http://{addr}"),
        Err(e) => tracing::warn!("Server running, local address unavailable: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
        panic!("HTTP server error: {e}");
    }

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
