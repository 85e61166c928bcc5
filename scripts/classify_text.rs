//! Sarcasm Classification Script
//!
//! This script classifies one sentence typed in the terminal with the same
//! cleanup and model the dashboard uses for single-text analysis.

use sarcofizz::config::{DEFAULT_INFERENCE_URL, DEFAULT_MODEL_ID};
use sarcofizz::{analyze_text, HuggingFaceClassifier};
use std::env;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("🤖 SarcoFizz Sarcasm Checker");
    println!("============================");

    let inference_url =
        env::var("HF_INFERENCE_URL").unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string());
    let model_id = env::var("SARCASM_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());
    let token = env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty());

    if token.is_none() {
        println!("⚠️  HF_API_TOKEN is not set, calling the inference API anonymously");
    }

    // Get the sentence from the user
    print!("📝 Enter text to check: ");
    io::stdout().flush()?;
    let mut text = String::new();
    io::stdin().read_line(&mut text)?;
    let text = text.trim();

    if text.is_empty() {
        println!("❌ Text cannot be empty!");
        return Err("Text is required".into());
    }

    let model = HuggingFaceClassifier::new(&inference_url, &model_id, token);
    println!("📍 Model endpoint: {}", model.endpoint());

    println!("\n🔍 Analyzing...");
    match analyze_text(&model, text).await {
        Ok(prediction) => {
            println!("\n✅ Prediction: {}", prediction.summary());
        }
        Err(e) => {
            println!("\n💥 Failed to analyze text: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
