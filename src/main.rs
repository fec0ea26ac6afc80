//! OmniSearch: a universal search orchestrator
//!
//! This is the main entry point for the application.

use anyhow::Result;
use omnisearch::{
    config,
    history::HistoryRecorder,
    metrics::Metrics,
    network::HttpClient,
    providers::ProviderLoader,
    web::{create_router, AppState},
    Search,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before settings so the loader's messages are kept;
    // RUST_LOG wins over the configured level
    let rust_log = EnvFilter::try_from_default_env().ok();
    let from_env = rust_log.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(rust_log.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    info!("Starting OmniSearch v{}", omnisearch::VERSION);

    let settings = config::load()?;
    if settings.general.debug && !from_env {
        filter_handle.modify(|filter| *filter = EnvFilter::new("debug"))?;
    }

    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let metrics = settings
        .general
        .enable_metrics
        .then(|| Arc::new(Metrics::new()));

    // Load providers
    let registry = ProviderLoader::load(&settings, &client, metrics.clone())?;
    if registry.is_empty() {
        warn!("No providers loaded; every search will be rejected");
    }

    let mut search = Search::new(Arc::new(registry), settings.search.clone());
    if let Some(history) = HistoryRecorder::from_settings(&settings.history) {
        search = search.with_history(history);
    }
    if let Some(ref metrics) = metrics {
        search = search.with_metrics(metrics.clone());
    }

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state and router
    let state = AppState::new(settings, search, metrics);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
