//! Sarcasm classification adapter.
//!
//! This module maps the raw labels of the pretrained sarcasm model to readable
//! labels and emoji, and calls the hosted text-classification endpoint.

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fmt;

use crate::config::AppConfig;
use crate::oauth::build_bearer_auth_header;
use crate::twitter::sanitize_for_logging;

/// Raw model label for the "not sarcastic" class.
pub const RAW_NOT_SARCASTIC: &str = "LABEL_0";
/// Raw model label for the "sarcastic" class.
pub const RAW_SARCASTIC: &str = "LABEL_1";

/// Text the default text2text sarcasm model generates for sarcastic input.
pub const GENERATED_SARCASTIC: &str = "derison";
/// Text the default text2text sarcasm model generates for plain input.
pub const GENERATED_NOT_SARCASTIC: &str = "normal";

/// Readable sarcasm label.
///
/// Labels the model emits outside its two-class scheme are kept verbatim in
/// `Other` rather than treated as errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SarcasmLabel {
    Sarcastic,
    NotSarcastic,
    Other(String),
}

impl SarcasmLabel {
    /// Maps a raw model label to a readable label.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            RAW_SARCASTIC => SarcasmLabel::Sarcastic,
            RAW_NOT_SARCASTIC => SarcasmLabel::NotSarcastic,
            other => SarcasmLabel::Other(other.to_string()),
        }
    }

    /// Text shown in the results table, the chart and the CSV file.
    pub fn as_str(&self) -> &str {
        match self {
            SarcasmLabel::Sarcastic => "Sarcastic",
            SarcasmLabel::NotSarcastic => "Not Sarcastic",
            SarcasmLabel::Other(raw) => raw,
        }
    }

    /// Display emoji, empty for labels outside the two-class scheme.
    pub fn emoji(&self) -> &'static str {
        match self {
            SarcasmLabel::Sarcastic => "😏",
            SarcasmLabel::NotSarcastic => "🙂",
            SarcasmLabel::Other(_) => "",
        }
    }
}

impl fmt::Display for SarcasmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw model label to its readable form; unknown labels pass through.
///
/// ```rust
/// use sarcofizz::classifier::label_map;
///
/// assert_eq!(label_map("LABEL_0"), "Not Sarcastic");
/// assert_eq!(label_map("LABEL_1"), "Sarcastic");
/// assert_eq!(label_map("LABEL_99"), "LABEL_99");
/// ```
pub fn label_map(raw: &str) -> String {
    SarcasmLabel::from_raw(raw).as_str().to_string()
}

/// Emoji for a readable label, empty string when the label is not mapped.
pub fn emoji_for(label: &str) -> &'static str {
    match label {
        "Sarcastic" => SarcasmLabel::Sarcastic.emoji(),
        "Not Sarcastic" => SarcasmLabel::NotSarcastic.emoji(),
        _ => "",
    }
}

/// Top-scoring label of one classification call.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: SarcasmLabel,
    /// Confidence of `label`, in `[0, 1]`
    pub score: f64,
}

impl Prediction {
    pub fn new(raw_label: &str, score: f64) -> Self {
        Self {
            label: SarcasmLabel::from_raw(raw_label),
            score,
        }
    }

    /// The line shown for single-text analysis, e.g. `Sarcastic 😏 (Confidence: 0.93)`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} (Confidence: {:.2})",
            self.label,
            self.label.emoji(),
            self.score
        )
    }
}

/// A text-classification model that scores text for sarcasm.
#[async_trait]
pub trait SarcasmModel: Send + Sync {
    /// Classifies one (already normalized) text and returns the top-scoring label.
    async fn classify(
        &self,
        text: &str,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>>;
}

/// One label/score pair from the inference API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Output of a text2text model, which answers with generated text only.
#[derive(Debug, Clone, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Classification models answer either with a flat list of candidates or with
/// a list holding one candidate list per input. Text2text models answer with
/// generated text instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Generated(Vec<GeneratedText>),
    Error { error: String },
}

/// Maps text generated by a text2text sarcasm model to a raw class label.
///
/// Generated text carries no score, so the prediction gets a confidence of 1.0.
/// Unrecognized text passes through as the label.
fn prediction_from_generated(generated: &str) -> Prediction {
    let generated = generated.trim();
    let raw_label = if generated.eq_ignore_ascii_case(GENERATED_SARCASTIC) {
        RAW_SARCASTIC
    } else if generated.eq_ignore_ascii_case(GENERATED_NOT_SARCASTIC) {
        RAW_NOT_SARCASTIC
    } else {
        generated
    };
    Prediction::new(raw_label, 1.0)
}

/// Picks the top-scoring prediction out of an inference API response body.
///
/// # Returns
///
/// - `Ok(Prediction)`: The candidate with the highest score, or the label
///   matching the generated text of a text2text model
/// - `Err(...)`: If the body is not a classification response, carries an
///   `error` object, or holds no candidates
pub(crate) fn parse_inference_response(
    body: &str,
) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
    let candidates = match serde_json::from_str::<InferenceResponse>(body)? {
        InferenceResponse::Nested(mut lists) => {
            if lists.is_empty() {
                Vec::new()
            } else {
                lists.swap_remove(0)
            }
        }
        InferenceResponse::Flat(list) => list,
        InferenceResponse::Generated(outputs) => {
            return outputs
                .first()
                .map(|output| prediction_from_generated(&output.generated_text))
                .ok_or_else(|| "Inference API returned no generated text".into());
        }
        InferenceResponse::Error { error } => {
            return Err(format!("Inference API error: {}", error).into());
        }
    };

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| Prediction::new(&best.label, best.score))
        .ok_or_else(|| "Inference API returned no labels".into())
}

/// Sarcasm model served by a hosted text-classification inference endpoint.
#[derive(Clone)]
pub struct HuggingFaceClassifier {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HuggingFaceClassifier {
    /// Creates a classifier for `{inference_url}/{model_id}`.
    pub fn new(inference_url: &str, model_id: &str, token: Option<String>) -> Self {
        let endpoint = format!("{}/{}", inference_url.trim_end_matches('/'), model_id);
        info!("Sarcasm model endpoint: {}", endpoint);
        Self {
            client: Client::new(),
            endpoint,
            token,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.inference_url,
            &config.model_id,
            config.inference_token.clone(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SarcasmModel for HuggingFaceClassifier {
    async fn classify(
        &self,
        text: &str,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        debug!("Classifying text: {}", sanitize_for_logging(text, 100));

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.header("Authorization", build_bearer_auth_header(token));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Inference request failed - Status: {}", status);
            debug!("Error response: {}", sanitize_for_logging(&body, 200));
            return Err(format!("Inference API error ({})", status).into());
        }

        let prediction = parse_inference_response(&body)?;
        debug!(
            "Model answered {} with score {:.4}",
            prediction.label, prediction.score
        );
        Ok(prediction)
    }
}
