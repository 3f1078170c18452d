//! Main entry point for the embedding API

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use embedding_api::{api, core::Config, EmbeddingApiService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration once; nothing below reads the environment again
    let config = Config::from_env()?;
    tracing::info!(
        store = %config.store.url,
        collection = %config.store.collection,
        model = %config.model.model_id,
        region = %config.model.region,
        surface = ?config.routing.surface,
        payload = ?config.routing.payload,
        "Starting embedding API on {}:{}",
        config.server.host,
        config.server.port
    );

    let service = EmbeddingApiService::new(config.clone()).await?;
    let app = api::app(service.app_state());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
