//! Export module for dairy-statement
//!
//! Turns a generated statement into a file:
//! - PDF: printable statement with summary
//! - XLSX: spreadsheet with an extra Items column and numeric amounts
//! - CSV: plain order rows for other tools

pub mod document;
pub mod pdf;
pub mod xlsx;

pub use document::{
    csv_file_name, format_pdf, format_spreadsheet, pdf_file_name, xlsx_file_name, PdfStatement,
    SheetCell, SpreadsheetStatement, StatementMeta,
};
pub use pdf::write_pdf;
pub use xlsx::write_xlsx;

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DairyError, DairyResult};
use crate::reports::StatementResult;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Printable PDF statement
    Pdf,
    /// Excel workbook
    Xlsx,
    /// CSV order rows
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Xlsx => write!(f, "xlsx"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl ExportFormat {
    pub fn file_name(&self, meta: &StatementMeta) -> String {
        match self {
            Self::Pdf => pdf_file_name(meta),
            Self::Xlsx => xlsx_file_name(meta),
            Self::Csv => csv_file_name(meta),
        }
    }
}

/// Write a statement into `dir` and return the path of the new file
pub fn export_statement(
    statement: &StatementResult,
    meta: &StatementMeta,
    format: ExportFormat,
    dir: &Path,
) -> DairyResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        DairyError::Export(format!(
            "Failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(format.file_name(meta));

    match format {
        ExportFormat::Pdf => write_pdf(&format_pdf(statement, meta), &path)?,
        ExportFormat::Xlsx => write_xlsx(&format_spreadsheet(statement, meta), &path)?,
        ExportFormat::Csv => {
            let file = File::create(&path).map_err(|e| {
                DairyError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            statement.export_csv(BufWriter::new(file), &meta.date_format)?;
        }
    }

    tracing::info!(
        format = %format,
        path = %path.display(),
        orders = statement.total_orders,
        "exported statement"
    );

    Ok(path)
}
