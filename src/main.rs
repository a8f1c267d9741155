use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use statline::api::{create_router, AppState};
use statline::config::Config;
use statline::fetch::{Fetch, HttpFetcher};
use statline::service::RosterService;
use statline::tasks::spawn_sweep_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statline=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        source = %config.source_base_url,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        max_concurrent_fetches = config.max_concurrent_fetches,
        port = config.server_port,
        "starting statline server"
    );

    let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::from_config(&config)?);
    let service = Arc::new(RosterService::new(fetcher, &config));

    let sweep_handle = spawn_sweep_task(service.cache(), config.sweep_interval);

    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await?;

    info!("server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM, then stop the sweep task.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }

    sweep_handle.abort();
    warn!("sweep task stopped");
}
