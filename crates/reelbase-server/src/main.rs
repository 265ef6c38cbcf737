use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

mod config;
mod error;
mod handlers;
mod routes;

use config::Config;
use handlers::AppState;
use reelbase_store::MovieStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config file: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.to_lowercase())
            }),
        )
        .init();

    info!("Starting reelbase server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Host: {}", config.server.host);
    info!("  Port: {}", config.server.port);
    info!("  Database: {}", config.database.path.display());

    let store = MovieStore::open_path(&config.database.path)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    let app = routes::router(AppState { store });
    axum::serve(listener, app).await?;

    Ok(())
}
