//! Export record data structure

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::export::{ExportFormat, StatementMeta};
use crate::models::Money;
use crate::reports::StatementResult;

/// One completed statement export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub format: ExportFormat,
    pub path: PathBuf,
    pub customer_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_orders: usize,
    pub total_amount: Money,
    pub pending_amount: Money,
}

impl ExportRecord {
    /// Record an export that was just written to `path`
    pub fn new(
        format: ExportFormat,
        path: &Path,
        meta: &StatementMeta,
        statement: &StatementResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            format,
            path: path.to_path_buf(),
            customer_label: meta.customer_label.clone(),
            start_date: meta.start_date,
            end_date: meta.end_date,
            total_orders: statement.total_orders,
            total_amount: statement.total_amount,
            pending_amount: statement.pending_amount,
        }
    }

    /// One-line summary for `dairy history`
    pub fn format_summary(&self) -> String {
        let customer = if self.customer_label.is_empty() {
            "(unknown customer)"
        } else {
            self.customer_label.as_str()
        };
        format!(
            "{} {} {} {} to {} orders={} total={} pending={} -> {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.format,
            customer,
            self.start_date,
            self.end_date,
            self.total_orders,
            self.total_amount,
            self.pending_amount,
            self.path.display()
        )
    }
}
