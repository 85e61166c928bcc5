//! Configuration module for the sarcofizz service.
//!
//! This module contains configuration structures and environment variable handling
//! for the Twitter/X API and the hosted sarcasm classification model.

use log::{debug, error, info, warn};
use std::env;
use std::fmt;

/// Default base URL of the Twitter/X API v2.
pub const DEFAULT_XAPI_BASE_URL: &str = "https://api.x.com/2";

/// Default base URL of the hosted inference API.
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Pretrained sarcasm model used when `SARCASM_MODEL_ID` is not set.
pub const DEFAULT_MODEL_ID: &str = "mrm8488/t5-base-finetuned-sarcasm-twitter";

/// File the batch results are written to when `RESULTS_CSV_PATH` is not set.
pub const DEFAULT_RESULTS_PATH: &str = "twitter_sarcasm_results.csv";

/// Configuration struct for the sarcofizz service.
///
/// Holds the bearer credential for the Twitter/X recent search endpoint, the
/// location and optional token of the classification model, and the path the
/// batch results are written to.
#[derive(Clone)]
pub struct AppConfig {
    /// The Bearer Token for the Twitter/X API v2 (app-only, read operations)
    pub bearer_token: String,
    /// Base URL of the Twitter/X API v2
    pub xapi_base_url: String,
    /// Token for the hosted inference API, if the endpoint requires one
    pub inference_token: Option<String>,
    /// Base URL of the hosted inference API
    pub inference_url: String,
    /// Identifier of the pretrained sarcasm model
    pub model_id: String,
    /// Path of the CSV file written on every batch run
    pub results_path: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bearer_token", &mask_secret(&self.bearer_token))
            .field("xapi_base_url", &self.xapi_base_url)
            .field(
                "inference_token",
                &self.inference_token.as_deref().map(mask_secret),
            )
            .field("inference_url", &self.inference_url)
            .field("model_id", &self.model_id)
            .field("results_path", &self.results_path)
            .finish()
    }
}

/// Masks a secret for logging, keeping at most the first and last eight characters.
///
/// # Example
///
/// ```rust
/// use sarcofizz::config::mask_secret;
///
/// assert_eq!(mask_secret("abcdefghijklmnopqrstuvwxyz"), "abcdefgh...stuvwxyz");
/// assert_eq!(mask_secret("short"), "short...");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let length = secret.chars().count();
    let prefix: String = secret.chars().take(8).collect();
    if length > 16 {
        let suffix: String = secret.chars().skip(length - 8).collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

/// Reads an optional environment variable, treating empty values as unset.
fn optional_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            info!("Found {} environment variable", name);
            Some(value)
        }
        Ok(_) => {
            warn!("{} is set but empty, ignoring it", name);
            None
        }
        Err(_) => {
            debug!("No {} found in environment variables", name);
            None
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` instance by loading settings from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `xapi_bearer_token`: Twitter API Bearer Token (app-only, used for recent search)
    ///
    /// # Optional Environment Variables
    ///
    /// - `XAPI_BASE_URL`: Twitter API base URL (defaults to `https://api.x.com/2`)
    /// - `HF_API_TOKEN`: Token for the hosted inference API
    /// - `HF_INFERENCE_URL`: Inference API base URL
    /// - `SARCASM_MODEL_ID`: Model identifier (defaults to `mrm8488/t5-base-finetuned-sarcasm-twitter`)
    /// - `RESULTS_CSV_PATH`: Output file for batch runs (defaults to `twitter_sarcasm_results.csv`)
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig)`: If the bearer token is present and non-empty
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the bearer token is missing or empty
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sarcofizz::AppConfig;
    ///
    /// std::env::set_var("xapi_bearer_token", "your_bearer_token");
    /// let config = AppConfig::from_env().unwrap();
    /// assert_eq!(config.results_path, "twitter_sarcasm_results.csv");
    /// ```
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading configuration from environment variables");

        let bearer_token = match env::var("xapi_bearer_token") {
            Ok(token) => {
                let token_length = token.len();
                info!(
                    "Found xapi_bearer_token environment variable with length: {}",
                    token_length
                );
                debug!("Bearer token (masked): {}", mask_secret(&token));

                if token.trim().is_empty() {
                    error!("Bearer token is empty");
                    return Err("Bearer token cannot be empty".into());
                }

                if token_length < 10 {
                    warn!(
                        "Bearer token seems unusually short ({} characters)",
                        token_length
                    );
                }

                token
            }
            Err(e) => {
                error!("Failed to load xapi_bearer_token from environment: {}", e);
                error!("Make sure xapi_bearer_token environment variable is set");
                return Err(
                    format!("Missing xapi_bearer_token environment variable: {}", e).into(),
                );
            }
        };

        let inference_token = optional_var("HF_API_TOKEN");
        if let Some(token) = &inference_token {
            debug!("Inference token (masked): {}", mask_secret(token));
        } else {
            info!("No HF_API_TOKEN set - calling the inference API anonymously");
        }

        let config = AppConfig {
            bearer_token,
            xapi_base_url: optional_var("XAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_XAPI_BASE_URL.to_string()),
            inference_token,
            inference_url: optional_var("HF_INFERENCE_URL")
                .unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()),
            model_id: optional_var("SARCASM_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            results_path: optional_var("RESULTS_CSV_PATH")
                .unwrap_or_else(|| DEFAULT_RESULTS_PATH.to_string()),
        };

        info!(
            "Configuration loaded: model '{}', results written to '{}'",
            config.model_id, config.results_path
        );

        Ok(config)
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set it defaults to 3000.
///
/// # Returns
///
/// - `Ok(u16)`: The configured or default port
/// - `Err(...)`: If `PORT` is set to something that is not a valid port number
///
/// # Example
///
/// ```rust
/// use sarcofizz::get_server_port;
///
/// std::env::remove_var("PORT");
/// assert_eq!(get_server_port().unwrap(), 3000);
/// ```
pub fn get_server_port() -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
    match env::var("PORT") {
        Ok(port) => port
            .parse()
            .map_err(|e| format!("PORT must be a valid number, got '{}': {}", port, e).into()),
        Err(_) => Ok(3000),
    }
}
