//! Tweet search functionality for Twitter API.
//!
//! This module contains the recent search call used by batch analysis and the
//! `TweetSource` abstraction the analysis flow fetches tweets through.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::config::AppConfig;
use crate::oauth::build_bearer_auth_header;

use super::api::{sanitize_for_logging, send_authenticated_request};
use super::parsing::extract_tweet_texts;

/// Largest `max_results` the recent search endpoint accepts.
pub const MAX_RESULTS_LIMIT: usize = 100;

/// Smallest `max_results` the recent search endpoint accepts.
pub const MIN_RESULTS_LIMIT: usize = 10;

/// Filters appended to every user query: original English tweets only.
pub const QUERY_FILTERS: &str = "-is:retweet lang:en";

/// Builds the search query sent to the API from the user's query.
///
/// ```rust
/// use sarcofizz::twitter::build_search_query;
///
/// assert_eq!(build_search_query("CocaCola"), "CocaCola -is:retweet lang:en");
/// ```
pub fn build_search_query(query: &str) -> String {
    format!("{} {}", query.trim(), QUERY_FILTERS)
}

/// Number of tweets to request for a desired count.
///
/// The count is capped at 100. The API rejects values below 10, so smaller
/// counts request 10 and the caller truncates the result.
pub fn requested_max_results(count: usize) -> usize {
    count.min(MAX_RESULTS_LIMIT).max(MIN_RESULTS_LIMIT)
}

/// Builds the recent search URL for a query and desired count.
pub fn build_search_url(api_base: &str, query: &str, count: usize) -> String {
    format!(
        "{}/tweets/search/recent?query={}&max_results={}&tweet.fields=text",
        api_base.trim_end_matches('/'),
        urlencoding::encode(&build_search_query(query)),
        requested_max_results(count)
    )
}

/// A source of recent tweets matching a search query.
#[async_trait]
pub trait TweetSource: Send + Sync {
    /// Returns up to `min(count, 100)` tweet texts matching `query`, in API order.
    async fn recent_tweets(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Searches recent tweets matching a query using the Twitter API v2.
///
/// The query is restricted to English, non-retweet posts. No pagination is
/// performed, so at most 100 tweets are returned.
///
/// # Parameters
///
/// - `config`: Configuration holding the bearer token and API base URL
/// - `query`: The user's search query
/// - `count`: Desired number of tweets
///
/// # Returns
///
/// - `Ok(Vec<String>)`: Tweet texts in the order the API returned them (may be empty)
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: On authentication, rate limit,
///   network or parsing failures
pub async fn search_recent_tweets(
    config: &AppConfig,
    query: &str,
    count: usize,
) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    XApiClient::new(config).recent_tweets(query, count).await
}

/// Twitter/X API v2 client authenticated with an app-only bearer token.
#[derive(Clone)]
pub struct XApiClient {
    client: Client,
    api_base: String,
    bearer_token: String,
}

impl XApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.xapi_base_url.clone(),
            bearer_token: config.bearer_token.clone(),
        }
    }
}

#[async_trait]
impl TweetSource for XApiClient {
    async fn recent_tweets(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        info!(
            "Searching recent tweets for query '{}' (count {})",
            sanitize_for_logging(query, 100),
            count
        );

        let url = build_search_url(&self.api_base, query, count);
        debug!("Search URL: {}", url);

        let request_builder = self
            .client
            .get(&url)
            .header("Authorization", build_bearer_auth_header(&self.bearer_token));

        let response_text = send_authenticated_request(request_builder, "search_recent").await?;
        let mut texts = extract_tweet_texts(&response_text)?;
        texts.truncate(count.min(MAX_RESULTS_LIMIT));

        Ok(texts)
    }
}
