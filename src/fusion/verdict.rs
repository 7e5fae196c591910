// Verdict: the one value a moderation request produces.
//
// A verdict either rests on a lexicon hit or on the two remote signals;
// `VerdictBasis` keeps those apart so a dictionary verdict can never carry
// classifier or judge fields. Serializing a verdict yields the caller-facing
// JSON shape.

use serde::{Serialize, Serializer};

use crate::signals::traits::{Confidence, Label};

/// Final decision for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallLabel {
    Safe,
    Unsafe,
    /// The signals disagree and a person has to decide.
    HumanReview,
}

impl OverallLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallLabel::Safe => "safe",
            OverallLabel::Unsafe => "unsafe",
            OverallLabel::HumanReview => "human_review",
        }
    }
}

impl From<Label> for OverallLabel {
    fn from(label: Label) -> Self {
        match label {
            Label::Safe => OverallLabel::Safe,
            Label::Unsafe => OverallLabel::Unsafe,
        }
    }
}

impl std::fmt::Display for OverallLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classifier's contribution: its label, or skipped by language routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelResult {
    Safe,
    Unsafe,
    Skipped,
}

impl ModelResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelResult::Safe => "safe",
            ModelResult::Unsafe => "unsafe",
            ModelResult::Skipped => "skipped",
        }
    }
}

impl From<Label> for ModelResult {
    fn from(label: Label) -> Self {
        match label {
            Label::Safe => ModelResult::Safe,
            Label::Unsafe => ModelResult::Unsafe,
        }
    }
}

/// Per-signal detail for verdicts decided by the classifier and judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalBreakdown {
    pub classifier_label: ModelResult,
    pub classifier_confidence: Confidence,
    pub flagged_terms: Vec<String>,
    pub judge_label: Label,
    pub judge_confidence: Confidence,
    pub explanation: String,
    pub suggested_correction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerdictBasis {
    /// The lexicon matched; nothing downstream was consulted.
    Dictionary { matched_words: Vec<String> },
    Signals(SignalBreakdown),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub overall_label: OverallLabel,
    pub detected_language: String,
    pub basis: VerdictBasis,
}

impl Verdict {
    pub fn dictionary_match(&self) -> bool {
        matches!(self.basis, VerdictBasis::Dictionary { .. })
    }

    /// Matched lexicon terms; empty unless `dictionary_match()`.
    pub fn matched_words(&self) -> &[String] {
        match &self.basis {
            VerdictBasis::Dictionary { matched_words } => matched_words,
            VerdictBasis::Signals(_) => &[],
        }
    }

    pub fn signals(&self) -> Option<&SignalBreakdown> {
        match &self.basis {
            VerdictBasis::Signals(breakdown) => Some(breakdown),
            VerdictBasis::Dictionary { .. } => None,
        }
    }

    /// Build the caller-facing response.
    pub fn to_response(&self) -> AnalysisResponse {
        match &self.basis {
            VerdictBasis::Dictionary { matched_words } => {
                AnalysisResponse::Dictionary(DictionaryResponse {
                    overall_label: self.overall_label,
                    dictionary_match: true,
                    matched_words: matched_words.clone(),
                    detected_language: self.detected_language.clone(),
                })
            }
            VerdictBasis::Signals(s) => {
                let counted = s.classifier_label != ModelResult::Skipped;
                AnalysisResponse::Full(FullResponse {
                    overall_label: self.overall_label,
                    dictionary_match: false,
                    model_result: s.classifier_label,
                    gemini_result: s.judge_label,
                    gemini_explanation: s.explanation.clone(),
                    detected_language: self.detected_language.clone(),
                    ml_confidence: counted.then_some(s.classifier_confidence),
                    ml_toxic_words: counted.then(|| s.flagged_terms.clone()),
                    gemini_confidence: s.judge_confidence,
                    suggested_correction: Some(s.suggested_correction.clone())
                        .filter(|c| !c.is_empty()),
                })
            }
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_response().serialize(serializer)
    }
}

/// Caller-facing JSON, one of two shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Dictionary(DictionaryResponse),
    Full(FullResponse),
}

#[derive(Debug, Clone, Serialize)]
pub struct DictionaryResponse {
    pub overall_label: OverallLabel,
    pub dictionary_match: bool,
    pub matched_words: Vec<String>,
    pub detected_language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FullResponse {
    pub overall_label: OverallLabel,
    pub dictionary_match: bool,
    pub model_result: ModelResult,
    pub gemini_result: Label,
    pub gemini_explanation: String,
    pub detected_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_toxic_words: Option<Vec<String>>,
    pub gemini_confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_correction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals_verdict(classifier_label: ModelResult, correction: &str) -> Verdict {
        Verdict {
            overall_label: OverallLabel::Safe,
            detected_language: "creole".to_string(),
            basis: VerdictBasis::Signals(SignalBreakdown {
                classifier_label,
                classifier_confidence: Confidence::from_percent(70.0),
                flagged_terms: vec!["zafer".to_string()],
                judge_label: Label::Safe,
                judge_confidence: Confidence::from_percent(80.0),
                explanation: "Friendly greeting.".to_string(),
                suggested_correction: correction.to_string(),
            }),
        }
    }

    #[test]
    fn test_dictionary_shape_has_only_four_fields() {
        let verdict = Verdict {
            overall_label: OverallLabel::Unsafe,
            detected_language: "creole".to_string(),
            basis: VerdictBasis::Dictionary {
                matched_words: vec!["bourik".to_string()],
            },
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "overall_label": "unsafe",
                "dictionary_match": true,
                "matched_words": ["bourik"],
                "detected_language": "creole",
            })
        );
    }

    #[test]
    fn test_full_shape_includes_classifier_fields_when_counted() {
        let json = serde_json::to_value(signals_verdict(ModelResult::Safe, "")).unwrap();
        assert_eq!(json["model_result"], "safe");
        assert_eq!(json["ml_confidence"], 70);
        assert_eq!(json["ml_toxic_words"], serde_json::json!(["zafer"]));
        assert_eq!(json["gemini_confidence"], 80);
        assert_eq!(json["dictionary_match"], false);
        assert!(json.get("suggested_correction").is_none());
    }

    #[test]
    fn test_full_shape_omits_classifier_fields_when_skipped() {
        let json = serde_json::to_value(signals_verdict(ModelResult::Skipped, "Mo pa kone")).unwrap();
        assert_eq!(json["model_result"], "skipped");
        assert!(json.get("ml_confidence").is_none());
        assert!(json.get("ml_toxic_words").is_none());
        assert_eq!(json["suggested_correction"], "Mo pa kone");
    }

    #[test]
    fn test_human_review_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OverallLabel::HumanReview).unwrap(),
            "\"human_review\""
        );
    }

    #[test]
    fn test_matched_words_empty_for_signal_verdicts() {
        let verdict = signals_verdict(ModelResult::Unsafe, "");
        assert!(!verdict.dictionary_match());
        assert!(verdict.matched_words().is_empty());
        assert!(verdict.signals().is_some());
    }
}
