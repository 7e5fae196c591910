// Google Gemini implementation of the LLM judge.
//
// One `generateContent` call per request, temperature 0, JSON response mime
// type. The model is asked for a fixed JSON object; models still sometimes
// wrap it in a ```json fence, which we strip before parsing.
//
// API docs: https://ai.google.dev/api/generate-content

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{Confidence, JudgeSignal, LanguageJudge};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Language reported when the model leaves `detected_language` blank.
const FALLBACK_LANGUAGE: &str = "creole";

/// Gemini-backed judge.
pub struct GeminiJudge {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiJudge {
    pub fn new(api_key: String, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("kreolguard/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
        })
    }

    /// Point the client at a different API host (proxies, tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LanguageJudge for GeminiJudge {
    async fn judge(&self, text: &str) -> Result<JudgeSignal> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: build_prompt(text),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let answer = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .context("Gemini response contained no text")?;

        let signal = parse_judgement(&answer)?;

        debug!(
            is_toxic = signal.is_toxic,
            confidence = signal.confidence.value(),
            language = %signal.detected_language,
            "Gemini judged text"
        );

        Ok(signal)
    }
}

/// Moderation prompt sent with each request.
pub fn build_prompt(text: &str) -> String {
    // The text is JSON-quoted so embedded quotes can't break out of the prompt.
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""));

    format!(
        r#"You moderate user comments written in Mauritian Creole, French and English.
Decide whether the text below is toxic, offensive or hate speech, or safe.

Rules:
1. List every language present using only "creole", "french" or "english". If several are mixed, join them with commas.
2. Do not quote or translate the text in your explanation.
3. The explanation is one or two sentences, written in English.
4. Give a confidence score from 0 to 100.
5. suggested_correction: only fix words that break the meaning or grammar of the sentence. Keep Mauritian slang and SMS spellings (such as "p", "ggn", "criz", "ct", "baro") exactly as written, do not add French accents, and do not turn informal Creole into formal French. If the text is informal but still makes sense, return "".

Text: {quoted}

Reply with JSON only, in exactly this shape:
{{"detected_language": "creole, english", "is_toxic": false, "confidence_score": 88, "explanation": "...", "suggested_correction": ""}}"#
    )
}

/// Remove markdown code fences around a JSON answer.
pub fn strip_code_fences(answer: &str) -> &str {
    let trimmed = answer.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Turn the model's JSON answer into a judge signal.
pub fn parse_judgement(answer: &str) -> Result<JudgeSignal> {
    let payload: JudgementPayload = serde_json::from_str(strip_code_fences(answer))
        .context("Gemini answer was not the expected JSON object")?;

    let detected_language = payload
        .detected_language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());

    Ok(JudgeSignal {
        is_toxic: payload.is_toxic.unwrap_or(false),
        confidence: Confidence::from_percent(payload.confidence_score.unwrap_or(0.0)),
        detected_language,
        explanation: payload.explanation.unwrap_or_default(),
        suggested_correction: payload.suggested_correction.unwrap_or_default(),
    })
}

// --- Gemini API request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct JudgementPayload {
    is_toxic: Option<bool>,
    explanation: Option<String>,
    detected_language: Option<String>,
    confidence_score: Option<f64>,
    suggested_correction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {} "), "{}");
    }

    #[test]
    fn test_parse_full_judgement() {
        let signal = parse_judgement(
            r#"{"detected_language": "creole, english", "is_toxic": true,
                "confidence_score": 91, "explanation": "Insult.",
                "suggested_correction": ""}"#,
        )
        .unwrap();
        assert!(signal.is_toxic);
        assert_eq!(signal.confidence.value(), 91);
        assert_eq!(signal.detected_language, "creole, english");
        assert_eq!(signal.explanation, "Insult.");
        assert!(signal.suggested_correction.is_empty());
    }

    #[test]
    fn test_parse_fills_missing_fields() {
        let signal = parse_judgement("```json\n{\"is_toxic\": false}\n```").unwrap();
        assert!(!signal.is_toxic);
        assert_eq!(signal.confidence.value(), 0);
        assert_eq!(signal.detected_language, "creole");
        assert!(signal.explanation.is_empty());
    }

    #[test]
    fn test_parse_blank_language_defaults_to_creole() {
        let signal = parse_judgement(r#"{"detected_language": "  "}"#).unwrap();
        assert_eq!(signal.detected_language, "creole");
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(parse_judgement("Sorry, I can't help with that.").is_err());
    }

    #[test]
    fn test_prompt_quotes_text() {
        let prompt = build_prompt("li dir \"bonzour\"");
        assert!(prompt.contains(r#"Text: "li dir \"bonzour\"""#));
    }
}
