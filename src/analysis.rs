//! Batch and single-text sarcasm analysis.
//!
//! Both flows normalize text with [`preprocess`] before handing it to a
//! [`SarcasmModel`]. Batch analysis additionally fetches tweets through a
//! [`TweetSource`] and writes the results to a CSV file.

use log::{info, warn};
use std::path::Path;

use crate::classifier::{Prediction, SarcasmModel};
use crate::preprocess::preprocess;
use crate::twitter::{sanitize_for_logging, TweetSource};

/// Header row of the results file.
pub const CSV_HEADER: [&str; 2] = ["Tweet", "Sarcasm"];

/// One fetched tweet and the model's verdict on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedTweet {
    /// The tweet text as returned by the API
    pub text: String,
    pub prediction: Prediction,
}

/// Results of one batch run, in fetch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBatch {
    pub rows: Vec<AnalyzedTweet>,
}

impl ResultBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of tweets per readable label, most frequent first.
    ///
    /// Labels with equal counts keep the order in which they first appear.
    pub fn label_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let label = row.prediction.label.as_str();
            match counts.iter_mut().find(|(existing, _)| existing == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label.to_string(), 1)),
            }
        }
        // Stable sort keeps first-appearance order among ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Writes the batch as CSV with a `Tweet,Sarcasm` header.
    pub fn write_csv<W: std::io::Write>(
        &self,
        writer: W,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for row in &self.rows {
            csv_writer.write_record([row.text.as_str(), row.prediction.label.as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the batch to `path`, replacing any existing file.
    pub fn save_csv(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let file = std::fs::File::create(path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        self.write_csv(file)?;
        info!("Saved {} results to {}", self.len(), path.display());
        Ok(())
    }
}

/// Normalizes and classifies one text.
///
/// # Returns
///
/// - `Ok(Prediction)`: The model's top label and confidence
/// - `Err(...)`: If the model call fails
pub async fn analyze_text(
    model: &dyn SarcasmModel,
    text: &str,
) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
    let cleaned = preprocess(text);
    let prediction = model.classify(&cleaned).await?;
    info!(
        "Classified '{}' as {} ({:.2})",
        sanitize_for_logging(text, 80),
        prediction.label,
        prediction.score
    );
    Ok(prediction)
}

/// Fetches tweets for `query`, classifies each one, and saves the results.
///
/// Tweets are classified one at a time in fetch order. The first failing
/// classification aborts the run and nothing is written. On success the
/// results file at `output_path` is overwritten, even when no tweets matched.
///
/// # Parameters
///
/// - `source`: Where tweets are fetched from
/// - `model`: The sarcasm model
/// - `query`: The user's search query
/// - `count`: Desired number of tweets (capped at 100 by the source)
/// - `output_path`: CSV file to write
pub async fn analyze_tweets(
    source: &dyn TweetSource,
    model: &dyn SarcasmModel,
    query: &str,
    count: usize,
    output_path: &Path,
) -> Result<ResultBatch, Box<dyn std::error::Error + Send + Sync>> {
    let logged_query = sanitize_for_logging(query, 100);
    info!("Starting batch analysis for query '{}'", logged_query);

    let tweets = source.recent_tweets(query, count).await?;
    if tweets.is_empty() {
        warn!("No tweets matched query '{}'", logged_query);
    }

    let mut batch = ResultBatch {
        rows: Vec::with_capacity(tweets.len()),
    };
    for text in tweets {
        let prediction = model.classify(&preprocess(&text)).await?;
        batch.rows.push(AnalyzedTweet { text, prediction });
    }

    // File I/O runs off the async worker threads.
    let path = output_path.to_path_buf();
    let batch =
        tokio::task::spawn_blocking(move || batch.save_csv(&path).map(|()| batch)).await??;

    info!(
        "Batch analysis for '{}' finished: {:?}",
        logged_query,
        batch.label_counts()
    );
    Ok(batch)
}
