// Audit sink trait: where finished requests and user feedback go.
//
// Implementors: SqliteAuditSink (rusqlite, append-only tables) and
// LogAuditSink (structured log lines only). Both are async so a future
// network-backed sink fits behind the same interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{AuditRecord, FeedbackReport};

#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one moderation request and its outcome.
    async fn record_request(&self, record: &AuditRecord) -> Result<()>;

    /// Append one user-reported misclassification.
    async fn record_feedback(&self, report: &FeedbackReport) -> Result<()>;
}
