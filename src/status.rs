// Audit status display: request counts, verdict and language breakdowns,
// latest requests.

use anyhow::Result;
use std::path::Path;

use crate::db::SqliteAuditSink;
use crate::output::terminal::display_stats;

/// How many recent requests `status` lists.
const RECENT_LIMIT: u32 = 5;

/// Display audit status to the terminal.
pub async fn show(db: &SqliteAuditSink, db_path: &str) -> Result<()> {
    let file_size = std::fs::metadata(Path::new(db_path))
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let stats = db.stats().await?;
    if stats.total_requests == 0 && stats.feedback_reports == 0 {
        println!("No requests logged yet.");
        println!("  Run `kreolguard analyze \"some text\"` to moderate something");
        return Ok(());
    }

    let recent = db.recent_requests(RECENT_LIMIT).await?;
    display_stats(&stats, &recent);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
