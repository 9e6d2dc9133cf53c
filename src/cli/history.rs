//! History CLI command

use crate::config::DairyPaths;
use crate::error::DairyResult;
use crate::history::ExportLogger;

/// Print the most recent exports, newest last
pub fn handle_history_command(paths: &DairyPaths, limit: usize) -> DairyResult<()> {
    let logger = ExportLogger::new(paths.export_log());
    let records = logger.read_recent(limit)?;

    if records.is_empty() {
        println!("No exports recorded yet.");
        return Ok(());
    }

    for record in &records {
        println!("{}", record.format_summary());
    }
    Ok(())
}
