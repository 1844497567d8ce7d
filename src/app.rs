//! Application shell: startup, serving and shutdown

use std::future::Future;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::settings::Settings;

/// Resolve settings, bind the configured address and serve until Ctrl-C or SIGTERM.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let settings = Settings::from_project(&config.project);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    serve(listener, settings, shutdown_signal()).await
}

/// Serve on `listener` until `shutdown` completes, bracketed by lifecycle logs.
pub async fn serve<F>(listener: TcpListener, settings: Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Application startup");
    tracing::info!(
        version = settings.version(),
        "Observability-test-app version: {}",
        settings.version()
    );

    let router = create_router(AppState::new(settings));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    tracing::info!("Application shutdown");
    Ok(())
}

/// Completes on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
