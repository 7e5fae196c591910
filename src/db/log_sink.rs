// Audit sink that only emits structured log lines. Used when no database is
// configured (KREOLGUARD_AUDIT=log) or when built without the sqlite feature.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::models::{AuditRecord, FeedbackReport};
use super::traits::AuditSink;
use crate::output::truncate_chars;

pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn record_request(&self, record: &AuditRecord) -> Result<()> {
        info!(
            target: "kreolguard::audit",
            label = record.overall_label.as_str(),
            language = %record.detected_language,
            dictionary_match = record.dictionary_match,
            text_preview = %truncate_chars(&record.display_text, 80),
            "Moderation request"
        );
        Ok(())
    }

    async fn record_feedback(&self, report: &FeedbackReport) -> Result<()> {
        info!(
            target: "kreolguard::audit",
            original = %report.original_label,
            suggested = %report.suggested_label,
            language = %report.language,
            text_preview = %truncate_chars(&report.text, 80),
            "Misclassification reported"
        );
        Ok(())
    }
}
