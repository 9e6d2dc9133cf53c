//! Export logger for the append-only export log
//!
//! Each completed export is written as a single JSON line and flushed
//! immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{DairyError, DairyResult};

use super::entry::ExportRecord;

/// Writes and reads export records (JSONL)
pub struct ExportLogger {
    log_path: PathBuf,
}

impl ExportLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a record to the log
    pub fn log(&self, record: &ExportRecord) -> DairyResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| DairyError::Io(format!("Failed to open export log: {}", e)))?;

        let json = serde_json::to_string(record)
            .map_err(|e| DairyError::Json(format!("Failed to serialize export record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| DairyError::Io(format!("Failed to write export record: {}", e)))?;

        file.flush()
            .map_err(|e| DairyError::Io(format!("Failed to flush export log: {}", e)))?;

        Ok(())
    }

    /// Read all records, oldest first
    pub fn read_all(&self) -> DairyResult<Vec<ExportRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| DairyError::Io(format!("Failed to open export log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                DairyError::Io(format!(
                    "Failed to read export log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: ExportRecord = serde_json::from_str(&line).map_err(|e| {
                DairyError::Json(format!(
                    "Failed to parse export record at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            records.push(record);
        }

        Ok(records)
    }

    /// Read the most recent `count` records, oldest first
    pub fn read_recent(&self, count: usize) -> DairyResult<Vec<ExportRecord>> {
        let all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
