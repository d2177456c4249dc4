use clap::Parser;
use shortlink_core::Shortener;
use shortlink_gateway::cli::{Cli, StorageBackendArg};
use shortlink_gateway::{telemetry, App, AppState};
use shortlink_shortener::ShortenerService;
use shortlink_store::{InMemoryLinkStore, RedisLinkStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        redis_addr = %config.redis_addr,
        redis_db = config.redis_db,
        "starting shortlink gateway"
    );

    let shortener: Arc<dyn Shortener> = match config.storage {
        StorageBackendArg::Redis => {
            let store = RedisLinkStore::connect(&config.redis_url()).await?;
            Arc::new(ShortenerService::new(store))
        }
        StorageBackendArg::InMemory => Arc::new(ShortenerService::new(InMemoryLinkStore::new())),
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(shortener)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shortlink gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to listen for shutdown signal");
    }
}
