//! # SarcoFizz
//!
//! A Rust web dashboard that fetches tweets matching a search query from the
//! Twitter/X API v2 and labels each one with a pretrained sarcasm classifier.
//!
//! ## Environment Variables
//!
//! - `xapi_bearer_token`: Twitter API Bearer Token (required)
//! - `HF_API_TOKEN`: Inference API token (optional)
//! - `SARCASM_MODEL_ID`: Model identifier (optional)
//! - `RESULTS_CSV_PATH`: Batch results file (optional)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Dashboard
//! - `POST /analyze/tweets`: Batch analysis
//! - `POST /analyze/text`: Single-text analysis
//! - `GET /health`: Returns service health status

use axum::http::{header, HeaderValue};
use log::{error, info};
use sarcofizz::{
    get_server_port, routes, AppConfig, AppState, HuggingFaceClassifier, XApiClient,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Main entry point for the sarcofizz dashboard.
///
/// This function initializes the logging system, loads the configuration,
/// constructs the tweet source and the sarcasm model once, and serves the
/// dashboard until terminated with Ctrl-C.
///
/// # Middleware
///
/// The server includes HTTP request tracing middleware for logging and debugging
/// and sets `X-Content-Type-Options: nosniff` on every response.
///
/// # Logging
///
/// The application uses the `env_logger` crate for structured logging. Log levels
/// can be controlled via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// xapi_bearer_token=... cargo run
///
/// # Run on custom port with debug logging
/// PORT=8080 RUST_LOG=debug xapi_bearer_token=... cargo run
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize the logging system
    env_logger::init();

    let config = AppConfig::from_env()?;

    // The clients are built once and shared by every request
    let state = AppState {
        source: Arc::new(XApiClient::new(&config)),
        model: Arc::new(HuggingFaceClassifier::from_config(&config)),
        results_path: PathBuf::from(&config.results_path),
    };

    let app = routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            )),
    );

    let port = get_server_port()?;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting sarcofizz server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {}", e);
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
