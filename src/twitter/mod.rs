//! Twitter/X API integration module.
//!
//! This module contains the recent search client used to fetch tweets for
//! batch analysis, authenticated with an OAuth 2.0 Bearer Token.

mod api;
mod parsing;
mod search;

// Re-export public API
pub use search::{
    build_search_query, build_search_url, requested_max_results, search_recent_tweets,
    TweetSource, XApiClient, MAX_RESULTS_LIMIT, MIN_RESULTS_LIMIT, QUERY_FILTERS,
};

// Crate-internal re-exports (used by tests and other modules)
pub(crate) use api::sanitize_for_logging;
#[cfg(test)]
pub(crate) use parsing::extract_tweet_texts;
