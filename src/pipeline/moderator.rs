// Moderation pipeline: one request from raw text to verdict.
//
// raw text → normalize → lexicon (short-circuit) → classifier ‖ judge
// → fusion → audit
//
// The only concurrency is the fan-out to the two remote signals. Both are
// joined under the caller's deadline; if it passes, the request fails with
// a timeout rather than fusing whatever came back. A slow signal is never
// read as "safe".

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use anyhow::Context;
use tracing::{info, warn};

use crate::db::models::{AuditRecord, FeedbackReport};
use crate::db::AuditSink;
use crate::error::ModerationError;
use crate::fusion::{self, verdict::Verdict};
use crate::lexicon::Lexicon;
use crate::normalize::NormalizedText;
use crate::output::truncate_chars;
use crate::signals::traits::{ClassifierSignal, JudgeSignal, LanguageJudge, ToxicityClassifier};
use crate::signals::{classify_or_default, judge_or_default};

/// Deadline applied by `analyze` when the caller doesn't pick one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a request needs, shared read-only across requests.
#[derive(Clone)]
pub struct Moderator {
    lexicon: Arc<Lexicon>,
    classifier: Arc<dyn ToxicityClassifier>,
    judge: Arc<dyn LanguageJudge>,
    audit: Arc<dyn AuditSink>,
    request_timeout: Duration,
}

impl Moderator {
    pub fn new(
        lexicon: Arc<Lexicon>,
        classifier: Arc<dyn ToxicityClassifier>,
        judge: Arc<dyn LanguageJudge>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            lexicon,
            classifier,
            judge,
            audit,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Moderate `raw` under the default deadline.
    pub async fn analyze(&self, raw: &str) -> Result<Verdict, ModerationError> {
        self.analyze_within(raw, self.request_timeout).await
    }

    /// Moderate `raw`, failing with `Timeout` if the signals haven't both
    /// answered within `timeout`. The audit write gets whatever is left of
    /// the deadline and is abandoned when it runs out.
    pub async fn analyze_within(
        &self,
        raw: &str,
        timeout: Duration,
    ) -> Result<Verdict, ModerationError> {
        let started = Instant::now();
        let text = NormalizedText::from_raw(raw);
        if text.is_empty() {
            return Err(ModerationError::EmptyInput);
        }

        let matched_words = self.lexicon.find_matches(&text.matching);

        let verdict = if !matched_words.is_empty() {
            info!(matched = ?matched_words, "Lexicon short-circuit");
            fusion::dictionary_verdict(matched_words)
        } else {
            let (classifier, judge) = tokio::time::timeout(timeout, self.gather_signals(&text.display))
                .await
                .map_err(|_| {
                    warn!(
                        timeout = ?timeout,
                        text_preview = %truncate_chars(&text.display, 50),
                        "Signals did not answer before the deadline"
                    );
                    ModerationError::Timeout(timeout)
                })?;
            fusion::decide(matched_words, classifier, judge)
        };

        info!(
            label = %verdict.overall_label,
            language = %verdict.detected_language,
            dictionary_match = verdict.dictionary_match(),
            "Moderation complete"
        );

        let remaining = timeout.saturating_sub(started.elapsed());
        self.record(raw, &text, &verdict, remaining).await;

        Ok(verdict)
    }

    /// Store a user-reported misclassification. Unlike request auditing, a
    /// storage failure here is the caller's failure: the report is the point.
    pub async fn submit_feedback(&self, report: FeedbackReport) -> Result<(), ModerationError> {
        if report.text.trim().is_empty() {
            return Err(ModerationError::EmptyInput);
        }

        self.audit
            .record_feedback(&report)
            .await
            .context("Failed to save feedback")?;

        info!(
            original = %report.original_label,
            suggested = %report.suggested_label,
            "Feedback recorded"
        );
        Ok(())
    }

    /// Query both remote signals concurrently. Each falls back on its own
    /// failure, so one never blocks or fails the other.
    async fn gather_signals(&self, text: &str) -> (ClassifierSignal, JudgeSignal) {
        tokio::join!(
            classify_or_default(self.classifier.as_ref(), text),
            judge_or_default(self.judge.as_ref(), text),
        )
    }

    /// Audit failures and stalls are logged and swallowed; the verdict still
    /// goes out.
    async fn record(
        &self,
        raw: &str,
        text: &NormalizedText,
        verdict: &Verdict,
        budget: Duration,
    ) {
        let record = AuditRecord::new(raw, text, verdict);
        match tokio::time::timeout(budget, self.audit.record_request(&record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %format!("{e:#}"), "Failed to write audit record"),
            Err(_) => warn!(budget = ?budget, "Audit write did not finish before the deadline"),
        }
    }
}
