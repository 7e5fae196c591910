// HTTP client for the statistical toxicity classifier service.
//
// The service exposes `POST /predict` taking `{ "text": ... }` and returning
// `{ "is_toxic": bool, "score" | "confidence": number, "toxic_words": [...] }`.
// Older deployments send `confidence`, newer ones `score`; either may be a
// 0–1 probability or a 0–100 percentage.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{ClassifierSignal, Confidence, Label, ToxicityClassifier};

/// Default classifier endpoint for local development.
pub const DEFAULT_CLASSIFIER_URL: &str = "http://127.0.0.1:8000";

/// Classifier reached over HTTP.
pub struct HttpClassifier {
    client: Client,
    base_url: String,
}

impl HttpClassifier {
    /// Create a client for the service at `base_url`. `timeout` bounds each call.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("kreolguard/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ToxicityClassifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<ClassifierSignal> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&PredictRequest { text })
            .send()
            .await
            .context("Classifier request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Classifier returned {}: {}", status, body);
        }

        let prediction: PredictResponse = response
            .json()
            .await
            .context("Failed to parse classifier response")?;

        let signal = prediction.into_signal();

        debug!(
            label = %signal.label,
            confidence = signal.confidence.value(),
            flagged = signal.flagged_terms.len(),
            "Classifier scored text"
        );

        Ok(signal)
    }
}

// --- Classifier request/response types ---

#[derive(Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

/// Raw `/predict` payload. Public so the field handling can be tested
/// without a server.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub is_toxic: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub toxic_words: Option<Vec<String>>,
}

impl PredictResponse {
    /// `score` wins over `confidence`; neither present means zero.
    pub fn into_signal(self) -> ClassifierSignal {
        let raw = self.score.or(self.confidence).unwrap_or(0.0);
        ClassifierSignal {
            label: Label::from_toxic(self.is_toxic),
            confidence: Confidence::from_score(raw),
            flagged_terms: self.toxic_words.unwrap_or_default(),
        }
    }
}
