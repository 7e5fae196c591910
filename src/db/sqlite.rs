// SqliteAuditSink: rusqlite backend implementing the AuditSink trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across an .await point.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{AuditRecord, AuditStats, FeedbackReport, LoggedRequest};
use super::traits::AuditSink;

pub struct SqliteAuditSink {
    conn: Mutex<Connection>,
}

impl SqliteAuditSink {
    /// Wrap an already-opened connection whose tables exist.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// In-memory database with the schema applied. Used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }

    pub async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    pub async fn stats(&self) -> Result<AuditStats> {
        let conn = self.conn.lock().await;
        super::queries::get_stats(&conn)
    }

    pub async fn recent_requests(&self, limit: u32) -> Result<Vec<LoggedRequest>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_requests(&conn, limit)
    }
}

#[async_trait]
impl AuditSink for SqliteAuditSink {
    async fn record_request(&self, record: &AuditRecord) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::insert_search_log(&conn, record)?;
        Ok(())
    }

    async fn record_feedback(&self, report: &FeedbackReport) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::insert_misclassification(&conn, report)?;
        Ok(())
    }
}
