//! HTTP route handlers for the sarcofizz dashboard.
//!
//! This module contains the route handler functions that render the two-panel
//! dashboard and run batch or single-text analysis on form submission.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Form, Router,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::{analyze_text, analyze_tweets, ResultBatch};
use crate::classifier::{Prediction, SarcasmModel};
use crate::twitter::{sanitize_for_logging, TweetSource};

/// Query shown in the search field before the user types anything.
pub const DEFAULT_QUERY: &str = "CocaCola";
/// Initial position of the count selector.
pub const DEFAULT_COUNT: usize = 20;
/// Lowest value of the count selector.
pub const MIN_COUNT: usize = 10;
/// Highest value of the count selector.
pub const MAX_COUNT: usize = 100;

/// Dependencies shared by every request, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TweetSource>,
    pub model: Arc<dyn SarcasmModel>,
    /// CSV file overwritten by every batch run
    pub results_path: PathBuf,
}

/// Form fields of the tweet search panel.
#[derive(Debug, Deserialize)]
pub struct TweetsForm {
    #[serde(default)]
    pub query: String,
    pub count: Option<usize>,
}

/// Form fields of the free-text panel.
#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

/// Builds the router with all dashboard routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/analyze/tweets", post(handle_analyze_tweets))
        .route("/analyze/text", post(handle_analyze_text))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Clamps a requested count into the range offered by the count selector.
pub fn clamp_count(count: Option<usize>) -> usize {
    count.unwrap_or(DEFAULT_COUNT).clamp(MIN_COUNT, MAX_COUNT)
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "sarcofizz"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "sarcofizz"}))
}

/// Handles GET requests to the root `/` endpoint.
///
/// Renders the dashboard with both panels and no results.
pub async fn handle_root() -> Html<String> {
    Html(render_dashboard(&PanelState::default(), None, None))
}

/// Handles POST requests to the `/analyze/tweets` endpoint.
///
/// Fetches tweets for the submitted query, classifies them, saves them to the
/// results file and renders the table and label distribution chart.
///
/// # Returns
///
/// - `Ok(Html<String>)`: The dashboard with the batch results
/// - `Err((StatusCode, Html<String>))`: An error page if fetching, classification or saving failed
pub async fn handle_analyze_tweets(
    State(state): State<AppState>,
    Form(form): Form<TweetsForm>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let count = clamp_count(form.count);
    info!(
        "Batch analysis requested for query '{}' (count {})",
        sanitize_for_logging(&form.query, 100),
        count
    );

    let result = analyze_tweets(
        state.source.as_ref(),
        state.model.as_ref(),
        &form.query,
        count,
        &state.results_path,
    )
    .await;

    match result {
        Ok(batch) => {
            let panels = PanelState {
                query: form.query,
                count,
                ..PanelState::default()
            };
            let section = render_batch(&batch, &state.results_path.display().to_string());
            Ok(Html(render_dashboard(&panels, Some(&section), None)))
        }
        Err(e) => {
            error!("Batch analysis failed: {}", e);
            Err(error_page("Failed to fetch and analyze tweets", &e.to_string()))
        }
    }
}

/// Handles POST requests to the `/analyze/text` endpoint.
///
/// Classifies the submitted text and renders the prediction line.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Form(form): Form<TextForm>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let result = analyze_text(state.model.as_ref(), &form.text).await;

    match result {
        Ok(prediction) => {
            let panels = PanelState {
                text: form.text,
                ..PanelState::default()
            };
            let section = render_prediction(&prediction);
            Ok(Html(render_dashboard(&panels, None, Some(&section))))
        }
        Err(e) => {
            error!("Text analysis failed: {}", e);
            Err(error_page("Failed to analyze text", &e.to_string()))
        }
    }
}

/// Values the form fields are pre-filled with.
struct PanelState {
    query: String,
    count: usize,
    text: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            count: DEFAULT_COUNT,
            text: String::new(),
        }
    }
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SarcoFizz</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1, h2 {
            color: #333;
            margin-top: 0;
        }
        .panel {
            border-top: 1px solid #ddd;
            padding-top: 20px;
            margin-top: 20px;
        }
        input[type=text], textarea {
            width: 100%;
            padding: 8px;
            box-sizing: border-box;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }
        th, td {
            padding: 12px;
            text-align: left;
            border-bottom: 1px solid #ddd;
        }
        th {
            background-color: #f8f9fa;
            font-weight: 600;
            color: #555;
        }
        .success {
            color: #1e7e34;
        }
        .chart-row {
            display: flex;
            align-items: center;
            margin: 6px 0;
        }
        .chart-label {
            width: 140px;
        }
        .chart-bar {
            background-color: #4e79a7;
            color: white;
            padding: 4px 8px;
            text-align: right;
            font-variant-numeric: tabular-nums;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>🤖 SarcoFizz</h1>
"#;

const PAGE_TAIL: &str = r#"    </div>
</body>
</html>"#;

/// Renders the full dashboard, with optional result sections under each panel.
fn render_dashboard(
    panels: &PanelState,
    tweets_section: Option<&str>,
    text_section: Option<&str>,
) -> String {
    let mut html = String::from(PAGE_HEAD);

    html.push_str(&format!(
        r#"        <div class="panel" id="tweets">
            <h2>🔍 Search Tweets and Detect Sarcasm</h2>
            <form method="post" action="/analyze/tweets">
                <label for="query">Enter a Twitter search query:</label>
                <input type="text" id="query" name="query" value="{}">
                <label for="count">Number of tweets to fetch: <output id="count-value">{}</output></label>
                <input type="range" id="count" name="count" min="{}" max="{}" value="{}" oninput="document.getElementById('count-value').value = this.value">
                <button type="submit">Fetch and Analyze Tweets</button>
            </form>
"#,
        html_escape(&panels.query),
        panels.count,
        MIN_COUNT,
        MAX_COUNT,
        panels.count
    ));
    if let Some(section) = tweets_section {
        html.push_str(section);
    }
    html.push_str("        </div>\n");

    html.push_str(&format!(
        r#"        <div class="panel" id="text">
            <h2>💬 Check if your sentence is sarcastic</h2>
            <form method="post" action="/analyze/text">
                <label for="text-input">Enter text here:</label>
                <textarea id="text-input" name="text" rows="4">{}</textarea>
                <button type="submit">Analyze Text</button>
            </form>
"#,
        html_escape(&panels.text)
    ));
    if let Some(section) = text_section {
        html.push_str(section);
    }
    html.push_str("        </div>\n");

    html.push_str(PAGE_TAIL);
    html
}

/// Renders the results table, save notice and label distribution chart.
pub(crate) fn render_batch(batch: &ResultBatch, results_path: &str) -> String {
    let mut html = String::from(
        r#"            <table>
                <thead>
                    <tr>
                        <th>Tweet</th>
                        <th>Sarcasm</th>
                    </tr>
                </thead>
                <tbody>
"#,
    );

    for row in &batch.rows {
        html.push_str(&format!(
            "                    <tr>\n                        <td>{}</td>\n                        <td>{}</td>\n                    </tr>\n",
            html_escape(&row.text),
            html_escape(row.prediction.label.as_str())
        ));
    }

    html.push_str("                </tbody>\n            </table>\n");
    html.push_str(&format!(
        "            <p class=\"success\">✅ Results saved to {}</p>\n",
        html_escape(results_path)
    ));

    html.push_str("            <h3>Sarcasm Distribution</h3>\n");
    let counts = batch.label_counts();
    let max_count = counts.first().map(|(_, count)| *count).unwrap_or(0);
    if max_count == 0 {
        html.push_str("            <p class=\"empty\">No tweets found for this query.</p>\n");
        return html;
    }

    html.push_str("            <div class=\"chart\">\n");
    for (label, count) in &counts {
        let width = count * 100 / max_count;
        html.push_str(&format!(
            "                <div class=\"chart-row\"><span class=\"chart-label\">{}</span><span class=\"chart-bar\" style=\"width: {}%\">{}</span></div>\n",
            html_escape(label),
            width,
            count
        ));
    }
    html.push_str("            </div>\n");
    html
}

/// Renders the single-text prediction line.
pub(crate) fn render_prediction(prediction: &Prediction) -> String {
    format!(
        "            <p class=\"prediction\"><strong>Prediction:</strong> {}</p>\n",
        html_escape(&prediction.summary())
    )
}

/// Builds the generic error page returned when an analysis fails.
fn error_page(message: &str, details: &str) -> (StatusCode, Html<String>) {
    let mut html = String::from(PAGE_HEAD);
    html.push_str(&format!(
        "        <h2>{}</h2>\n        <pre>{}</pre>\n        <p><a href=\"/\">Back</a></p>\n",
        html_escape(message),
        html_escape(details)
    ));
    html.push_str(PAGE_TAIL);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html))
}

/// Escapes HTML special characters to prevent XSS attacks.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
