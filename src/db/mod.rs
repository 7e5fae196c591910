// Audit log: append-only record of every request and every piece of
// user feedback.
//
// SQLite via rusqlite with the "bundled" feature, so there's no system
// SQLite dependency. The database file lives wherever KREOLGUARD_DB_PATH
// points (defaults to ./kreolguard.db).

pub mod log_sink;
pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use log_sink::LogAuditSink;
pub use traits::AuditSink;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAuditSink;

#[cfg(feature = "sqlite")]
use anyhow::{Context, Result};
#[cfg(feature = "sqlite")]
use rusqlite::Connection;
#[cfg(feature = "sqlite")]
use std::path::Path;

/// Open (or create) the database and run migrations.
///
/// Called by `kreolguard init` and by every command that writes audit rows.
#[cfg(feature = "sqlite")]
pub fn initialize_sqlite(db_path: &str) -> Result<SqliteAuditSink> {
    // Create parent directories if needed
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // WAL keeps concurrent readers off the writer's back
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(SqliteAuditSink::new(conn))
}

/// Open an existing database (fails if it doesn't exist yet).
#[cfg(feature = "sqlite")]
pub fn open_sqlite(db_path: &str) -> Result<SqliteAuditSink> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `kreolguard init` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(SqliteAuditSink::new(conn))
}
