//! Authentication helpers for the external APIs.
//!
//! Both the Twitter/X recent search endpoint and the hosted inference API
//! accept a static credential in an OAuth 2.0 Bearer Token header.

/// Builds the Authorization header for OAuth 2.0 Bearer Token authentication.
///
/// This function creates the proper Authorization header for OAuth 2.0 Bearer Token
/// authentication, which is required for Twitter API v2 endpoints like search/recent
/// (read-only operations) and accepted by the inference API.
///
/// # Parameters
///
/// - `bearer_token`: The Bearer Token from the Twitter Developer Portal or inference provider
///
/// # Returns
///
/// A properly formatted Authorization header string for Bearer Token authentication.
///
/// # Format
///
/// The header follows this format:
/// ```text
/// Bearer YOUR_BEARER_TOKEN_HERE
/// ```
///
/// # Example
///
/// ```rust
/// use sarcofizz::build_bearer_auth_header;
///
/// let header = build_bearer_auth_header("your_bearer_token");
/// assert_eq!(header, "Bearer your_bearer_token");
/// ```
pub fn build_bearer_auth_header(bearer_token: &str) -> String {
    format!("Bearer {}", bearer_token)
}
