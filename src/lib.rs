//! # SarcoFizz Library
//!
//! A small web dashboard that fetches recent tweets from the Twitter/X API v2,
//! runs each one through a pretrained sarcasm classifier, and shows the labeled
//! results with a label distribution chart.
//!
//! ## Features
//!
//! - Batch mode: search recent tweets, classify them, save them to a CSV file
//! - Single-text mode: classify one sentence typed by the user
//! - Regex-based tweet text cleanup before classification
//! - Structured logging
//! - Health check endpoint
//!
//! ## Configuration
//!
//! The following configuration is required:
//! - `xapi_bearer_token`: Twitter API Bearer Token used for recent search
//! - `PORT`: Server port (defaults to 3000)
//!
//! See [`AppConfig::from_env`] for the optional settings.
//!
//! ## API Endpoints
//!
//! - `GET /`: Renders the dashboard
//! - `POST /analyze/tweets`: Batch analysis of tweets matching a query
//! - `POST /analyze/text`: Analysis of one free-text input
//! - `GET /health`: Returns service health status

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod handlers;
pub mod oauth;
pub mod preprocess;
pub mod twitter;

// Re-export commonly used types and functions
pub use analysis::{analyze_text, analyze_tweets, AnalyzedTweet, ResultBatch};
pub use classifier::{HuggingFaceClassifier, Prediction, SarcasmLabel, SarcasmModel};
pub use config::{get_server_port, AppConfig};
pub use handlers::{routes, AppState};
pub use oauth::build_bearer_auth_header;
pub use preprocess::preprocess;
pub use twitter::{search_recent_tweets, TweetSource, XApiClient};
