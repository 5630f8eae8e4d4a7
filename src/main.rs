use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use chainseal::{create_router, ApiState, Config, Network, NotaryService};

#[tokio::main]
async fn main() -> chainseal::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let network = match args.get(1).map(String::as_str) {
        Some("mainnet") => Network::Mainnet,
        Some("preview") => Network::Preview,
        _ => Network::Preprod, // Default to preprod for safety
    };

    match network {
        Network::Mainnet => tracing::warn!("Running on MAINNET - anchors cost real ADA!"),
        _ => tracing::info!("Running on {} - safe for testing", network.name()),
    }

    // Load configuration for the selected network
    let config = Config::load(network)?;
    let port = config.api.rest_port;

    let service = Arc::new(NotaryService::new(config)?);

    tracing::info!("🚀 Starting ChainSeal anchoring service");
    tracing::info!("🌐 Network: {}", network.name());

    let router = create_router(ApiState { service });
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("📡 REST API listening on port {}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
