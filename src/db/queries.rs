// Database queries: every SQL statement the audit log runs.
//
// Keeping SQL in one place gives the rest of the app plain Rust functions
// over a `Connection`, which the tests drive directly.

use anyhow::Result;
use rusqlite::{params, Connection};

use super::models::{AuditRecord, AuditStats, FeedbackReport, LoggedRequest};

// --- Requests ---

/// Append a moderation request and return its row ID.
pub fn insert_search_log(conn: &Connection, record: &AuditRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO search_logs
            (searched_text, normalized_text, display_text, detected_language,
             toxicity_result, dictionary_match, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.raw_text,
            record.normalized_text,
            record.display_text,
            record.detected_language,
            record.overall_label.as_str(),
            record.dictionary_match,
            record.recorded_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent requests first.
pub fn get_recent_requests(conn: &Connection, limit: u32) -> Result<Vec<LoggedRequest>> {
    let mut stmt = conn.prepare(
        "SELECT id, display_text, detected_language, toxicity_result, dictionary_match, created_at
         FROM search_logs
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        Ok(LoggedRequest {
            id: row.get(0)?,
            display_text: row.get(1)?,
            detected_language: row.get(2)?,
            overall_label: row.get(3)?,
            dictionary_match: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;

    let mut requests = Vec::new();
    for row in rows {
        requests.push(row?);
    }
    Ok(requests)
}

// --- Feedback ---

/// Append a misclassification report and return its row ID.
pub fn insert_misclassification(conn: &Connection, report: &FeedbackReport) -> Result<i64> {
    conn.execute(
        "INSERT INTO misclassifications
            (text_content, original_label, user_suggested_label, detected_language)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            report.text,
            report.original_label,
            report.suggested_label,
            report.language,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// --- Stats ---

/// Counts for `kreolguard status`.
pub fn get_stats(conn: &Connection) -> Result<AuditStats> {
    let total_requests: i64 =
        conn.query_row("SELECT COUNT(*) FROM search_logs", [], |row| row.get(0))?;
    let dictionary_matches: i64 = conn.query_row(
        "SELECT COUNT(*) FROM search_logs WHERE dictionary_match = 1",
        [],
        |row| row.get(0),
    )?;
    let feedback_reports: i64 =
        conn.query_row("SELECT COUNT(*) FROM misclassifications", [], |row| row.get(0))?;

    Ok(AuditStats {
        total_requests: total_requests as u64,
        by_label: grouped_counts(conn, "toxicity_result")?,
        by_language: grouped_counts(conn, "detected_language")?,
        dictionary_matches: dictionary_matches as u64,
        feedback_reports: feedback_reports as u64,
    })
}

/// (value, count) pairs for a search_logs column, most frequent first.
/// `column` is always one of our own literals, never user input.
fn grouped_counts(conn: &Connection, column: &str) -> Result<Vec<(String, u64)>> {
    let sql = format!(
        "SELECT {column}, COUNT(*) AS n FROM search_logs GROUP BY {column} ORDER BY n DESC, {column} ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        let value: String = row.get(0)?;
        let count: i64 = row.get(1)?;
        Ok((value, count as u64))
    })?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}
