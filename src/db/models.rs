// Data models for the audit log.
//
// These are separate from the storage code so the pipeline can build audit
// records without depending on rusqlite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fusion::verdict::{OverallLabel, Verdict};
use crate::normalize::NormalizedText;

/// One moderation request as it goes to the audit sink.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub raw_text: String,
    /// Matching form (what the lexicon saw).
    pub normalized_text: String,
    /// Sentence-cased form (what the signals saw).
    pub display_text: String,
    pub detected_language: String,
    pub overall_label: OverallLabel,
    pub dictionary_match: bool,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(raw_text: &str, text: &NormalizedText, verdict: &Verdict) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            normalized_text: text.matching.clone(),
            display_text: text.display.clone(),
            detected_language: verdict.detected_language.clone(),
            overall_label: verdict.overall_label,
            dictionary_match: verdict.dictionary_match(),
            recorded_at: Utc::now(),
        }
    }
}

/// A user-reported misclassification. Stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub text: String,
    pub original_label: String,
    pub suggested_label: String,
    pub language: String,
}

/// A stored request, as read back for status output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedRequest {
    pub id: i64,
    pub display_text: String,
    pub detected_language: String,
    pub overall_label: String,
    pub dictionary_match: bool,
    pub created_at: String,
}

/// Aggregate counts over the audit log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_requests: u64,
    /// (label, count), most frequent first.
    pub by_label: Vec<(String, u64)>,
    /// (language, count), most frequent first.
    pub by_language: Vec<(String, u64)>,
    pub dictionary_matches: u64,
    pub feedback_reports: u64,
}
