// Signal contracts: what the classifier and the judge hand to fusion.
//
// Both remote services are opaque. Adapters validate and reshape their
// responses into these closed types at the boundary, so nothing downstream
// ever sees a raw probability, a missing field, or a duck-typed payload.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A binary safety label from a single signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Safe,
    Unsafe,
}

impl Label {
    pub fn from_toxic(is_toxic: bool) -> Self {
        if is_toxic {
            Label::Unsafe
        } else {
            Label::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Safe => "safe",
            Label::Unsafe => "unsafe",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A confidence percentage, always within 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0);

    /// Clamp a percentage into range.
    pub fn from_percent(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Confidence(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Interpret a service score: values at or below 1.0 are probabilities
    /// and get scaled, anything larger is already a percentage.
    pub fn from_score(raw: f64) -> Self {
        if raw <= 1.0 {
            Self::from_percent(raw * 100.0)
        } else {
            Self::from_percent(raw)
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Output of the statistical classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierSignal {
    pub label: Label,
    pub confidence: Confidence,
    /// Terms the model attributed the decision to, most influential first.
    pub flagged_terms: Vec<String>,
}

impl ClassifierSignal {
    /// Substitute used when the classifier is unreachable or returns garbage.
    /// The classifier is advisory, so its absence reads as a zero-confidence "safe".
    pub fn unavailable() -> Self {
        Self {
            label: Label::Safe,
            confidence: Confidence::ZERO,
            flagged_terms: Vec::new(),
        }
    }
}

/// Output of the LLM judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeSignal {
    pub is_toxic: bool,
    pub confidence: Confidence,
    /// Free-form, possibly comma-joined ("creole, english").
    pub detected_language: String,
    pub explanation: String,
    /// Empty means no suggestion.
    pub suggested_correction: String,
}

impl JudgeSignal {
    /// Substitute used when the judge is unreachable or returns garbage.
    pub fn unavailable() -> Self {
        Self {
            is_toxic: false,
            confidence: Confidence::ZERO,
            detected_language: "unknown".to_string(),
            explanation: String::new(),
            suggested_correction: String::new(),
        }
    }

    pub fn label(&self) -> Label {
        Label::from_toxic(self.is_toxic)
    }
}

/// Statistical toxicity classifier. Implementations are usually HTTP clients.
#[async_trait]
pub trait ToxicityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierSignal>;
}

/// LLM judge: toxicity, language detection and an explanation in one call.
#[async_trait]
pub trait LanguageJudge: Send + Sync {
    async fn judge(&self, text: &str) -> Result<JudgeSignal>;
}
