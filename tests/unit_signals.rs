// Signal client tests against a mock HTTP server.
//
// wiremock stands in for the classifier service and the Gemini API so the
// real reqwest clients are exercised end to end: request shape, response
// parsing, and fallback on failures.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kreolguard::signals::classifier::HttpClassifier;
use kreolguard::signals::gemini::GeminiJudge;
use kreolguard::signals::traits::{Confidence, Label, LanguageJudge, ToxicityClassifier};
use kreolguard::signals::{classify_or_default, judge_or_default};

const TIMEOUT: Duration = Duration::from_secs(5);
const MODEL: &str = "gemini-2.0-flash";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

/// Wrap a judgement in the Gemini `generateContent` envelope.
fn gemini_envelope(answer: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": answer }]
            },
            "finishReason": "STOP"
        }]
    })
}

fn judge_for(server: &MockServer) -> GeminiJudge {
    GeminiJudge::new("test-key".to_string(), MODEL, TIMEOUT)
        .unwrap()
        .with_base_url(&server.uri())
}

// ============================================================
// Classifier
// ============================================================

#[tokio::test]
async fn classifier_posts_text_and_parses_prediction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(json!({ "text": "Ou enn imbesil" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_toxic": true,
            "score": 0.91,
            "toxic_words": ["imbesil"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(&server.uri(), TIMEOUT).unwrap();
    let signal = classifier.classify("Ou enn imbesil").await.unwrap();

    assert_eq!(signal.label, Label::Unsafe);
    assert_eq!(signal.confidence.value(), 91);
    assert_eq!(signal.flagged_terms, vec!["imbesil"]);
}

#[tokio::test]
async fn classifier_accepts_trailing_slash_and_legacy_confidence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_toxic": false,
            "confidence": 72.4
        })))
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let classifier = HttpClassifier::new(&base, TIMEOUT).unwrap();
    let signal = classifier.classify("Bonzour").await.unwrap();

    assert_eq!(signal.label, Label::Safe);
    assert_eq!(signal.confidence.value(), 72);
    assert!(signal.flagged_terms.is_empty());
}

#[tokio::test]
async fn classifier_server_error_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(&server.uri(), TIMEOUT).unwrap();
    let err = classifier.classify("Bonzour").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn classifier_failures_fall_back_to_safe_zero() {
    let server = MockServer::start().await;

    // missing is_toxic is malformed, not "safe"
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "score": 0.99 })))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(&server.uri(), TIMEOUT).unwrap();
    let signal = classify_or_default(&classifier, "Bonzour").await;

    assert_eq!(signal.label, Label::Safe);
    assert_eq!(signal.confidence, Confidence::ZERO);
    assert!(signal.flagged_terms.is_empty());
}

#[tokio::test]
async fn unreachable_classifier_falls_back() {
    // Nothing listens on port 9 on a test machine
    let classifier = HttpClassifier::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let signal = classify_or_default(&classifier, "Bonzour").await;
    assert_eq!(signal.label, Label::Safe);
    assert_eq!(signal.confidence, Confidence::ZERO);
}

// ============================================================
// Gemini judge
// ============================================================

#[tokio::test]
async fn judge_sends_key_and_parses_answer() {
    let server = MockServer::start().await;

    let answer = r#"{"detected_language": "creole, english", "is_toxic": true, "confidence_score": 86, "explanation": "Insults the reader.", "suggested_correction": ""}"#;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_envelope(answer)))
        .expect(1)
        .mount(&server)
        .await;

    let signal = judge_for(&server).judge("Ou enn imbesil").await.unwrap();

    assert!(signal.is_toxic);
    assert_eq!(signal.label(), Label::Unsafe);
    assert_eq!(signal.confidence.value(), 86);
    assert_eq!(signal.detected_language, "creole, english");
    assert_eq!(signal.explanation, "Insults the reader.");
    assert!(signal.suggested_correction.is_empty());
}

#[tokio::test]
async fn judge_strips_markdown_fences() {
    let server = MockServer::start().await;

    let answer = "```json\n{\"detected_language\": \"french\", \"is_toxic\": false, \"confidence_score\": 95, \"explanation\": \"Polite thanks.\", \"suggested_correction\": \"Merci beaucoup\"}\n```";

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_envelope(answer)))
        .mount(&server)
        .await;

    let signal = judge_for(&server).judge("Merci boucou").await.unwrap();

    assert!(!signal.is_toxic);
    assert_eq!(signal.detected_language, "french");
    assert_eq!(signal.suggested_correction, "Merci beaucoup");
}

#[tokio::test]
async fn judge_defaults_missing_language_to_creole() {
    let server = MockServer::start().await;

    let answer = r#"{"is_toxic": false, "confidence_score": 70, "explanation": "Greeting."}"#;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_envelope(answer)))
        .mount(&server)
        .await;

    let signal = judge_for(&server).judge("Bonzour").await.unwrap();
    assert_eq!(signal.detected_language, "creole");
    assert!(signal.suggested_correction.is_empty());
}

#[tokio::test]
async fn judge_failures_fall_back_to_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let judge = judge_for(&server);
    assert!(judge.judge("Bonzour").await.is_err());

    let signal = judge_or_default(&judge, "Bonzour").await;
    assert!(!signal.is_toxic);
    assert_eq!(signal.detected_language, "unknown");
    assert_eq!(signal.confidence, Confidence::ZERO);
    assert!(signal.explanation.is_empty());
}

#[tokio::test]
async fn judge_non_json_answer_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_envelope("I cannot help with that request.")),
        )
        .mount(&server)
        .await;

    let signal = judge_or_default(&judge_for(&server), "Bonzour").await;
    assert_eq!(signal.detected_language, "unknown");
}

#[tokio::test]
async fn judge_empty_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = judge_for(&server).judge("Bonzour").await.unwrap_err();
    assert!(err.to_string().contains("no text"));
}
