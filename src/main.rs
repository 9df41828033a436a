//! Tawfiq HTTP server entry point
//!
//! Starts the REST API for the conversation and retrieval service.
//! Corpus load failure is fatal: the process refuses to start
//! rather than serve with a partially loaded corpus.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tawfiq::core::config::Config;
use tawfiq::core::corpus::CorpusStore;
use tawfiq::core::llm::OpenAiCompatibleProvider;
use tawfiq::core::services::Services;
use tawfiq::http::{self, middleware as http_middleware};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tawfiq=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tawfiq retrieval service");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    config.log_config();

    // Load the reference corpora; any failure aborts startup
    let corpus = CorpusStore::load(&config.corpus)?;

    // Build the completion provider from config
    let provider = OpenAiCompatibleProvider::from_config(&config.provider)
        .map_err(|e| format!("Failed to build completion provider: {e}"))?;

    // Create shared services
    let services = Arc::new(Services::new(config.clone(), corpus, Box::new(provider)));

    // Build the API router
    let app = Router::new()
        // Health check endpoint
        .route("/health", get(http::health_handler))
        // API v1 endpoints
        .route("/api/v1/ask", post(http::ask_handler))
        .route("/api/v1/quran-query", post(http::quran_query_handler))
        .route("/api/v1/hadith-query", post(http::hadith_query_handler))
        // Add middleware
        .layer(middleware::from_fn(http_middleware::log_request))
        .layer(CorsLayer::permissive())
        // Add shared state
        .with_state(services);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    // Serve the application
    axum::serve(listener, app).await?;

    Ok(())
}
