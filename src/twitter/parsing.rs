//! Parsing of Twitter API v2 search responses.

use log::{info, warn};

/// Extracts the tweet texts from a recent search response, in API order.
///
/// A response without a `data` array (no matching tweets) yields an empty list.
/// Elements without a string `text` field are skipped.
///
/// # Returns
///
/// - `Ok(Vec<String>)`: The tweet texts
/// - `Err(...)`: If the body is not valid JSON
pub(crate) fn extract_tweet_texts(
    response_text: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let json_response: serde_json::Value = serde_json::from_str(response_text)?;

    if let Some(errors) = json_response.get("errors").and_then(|e| e.as_array()) {
        warn!("Search response carried {} error object(s)", errors.len());
    }

    let Some(tweets) = json_response.get("data").and_then(|d| d.as_array()) else {
        let result_count = json_response
            .get("meta")
            .and_then(|m| m.get("result_count"))
            .and_then(|c| c.as_u64())
            .unwrap_or(0);
        info!("No tweets found (result_count: {})", result_count);
        return Ok(Vec::new());
    };

    let texts: Vec<String> = tweets
        .iter()
        .filter_map(|tweet| tweet.get("text").and_then(|t| t.as_str()))
        .map(str::to_string)
        .collect();

    info!("Found {} tweets", texts.len());
    Ok(texts)
}
