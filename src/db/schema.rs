// Database schema: table creation and migrations.
//
// A `schema_version` table tracks which migrations have run. Both audit
// tables are append-only: rows are inserted, never updated.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent: safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per moderation request
        CREATE TABLE IF NOT EXISTS search_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            searched_text TEXT NOT NULL,       -- raw input as submitted
            normalized_text TEXT NOT NULL,     -- matching form seen by the lexicon
            display_text TEXT NOT NULL,        -- sentence-cased form seen by the signals
            detected_language TEXT NOT NULL,   -- final reported language
            toxicity_result TEXT NOT NULL,     -- safe / unsafe / human_review
            dictionary_match INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL           -- RFC 3339, set by the pipeline
        );

        -- User-reported misclassifications
        CREATE TABLE IF NOT EXISTS misclassifications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text_content TEXT NOT NULL,
            original_label TEXT NOT NULL,
            user_suggested_label TEXT NOT NULL,
            detected_language TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for per-label and per-language breakdowns
        CREATE INDEX IF NOT EXISTS idx_logs_result
            ON search_logs(toxicity_result);

        CREATE INDEX IF NOT EXISTS idx_logs_language
            ON search_logs(detected_language);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
