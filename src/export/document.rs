//! Statement document layouts
//!
//! Pure mappings from a generated statement to the tabular content of each
//! export format. Nothing here touches the filesystem; the `pdf` and `xlsx`
//! modules turn these layouts into files.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{Money, Order};
use crate::reports::StatementResult;

/// Column headings of the PDF order table
pub const PDF_COLUMNS: [&str; 6] = ["Date", "Customer", "Total", "Paid", "Balance", "Status"];

/// Column headings of the spreadsheet order table
pub const SHEET_COLUMNS: [&str; 7] = [
    "Date", "Customer", "Items", "Total", "Paid", "Balance", "Status",
];

/// Spreadsheet column widths, in characters
pub const SHEET_COLUMN_WIDTHS: [f64; 7] = [12.0, 20.0, 40.0, 10.0, 10.0, 10.0, 10.0];

pub const SHEET_NAME: &str = "Statement";

/// Rendering metadata shared by every export format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementMeta {
    /// e.g. "Jay Goga Milk - Statement"
    pub title: String,
    /// Customer name, "All Customers", or empty for an unknown id
    pub customer_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub currency_symbol: String,
    /// strftime format for order dates
    pub date_format: String,
}

impl StatementMeta {
    pub fn new(
        settings: &Settings,
        customer_label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            title: settings.statement_title(),
            customer_label: customer_label.into(),
            start_date,
            end_date,
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.display_date_format.clone(),
        }
    }

    pub fn customer_line(&self) -> String {
        format!("Customer: {}", self.customer_label)
    }

    pub fn period_line(&self) -> String {
        format!("Period: {} to {}", self.start_date, self.end_date)
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn display_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    /// The three summary figures as (label, formatted amount)
    pub fn summary(&self, statement: &StatementResult) -> [(&'static str, String); 3] {
        [
            ("Total Order Value", self.money(statement.total_amount)),
            ("Total Paid", self.money(statement.total_paid)),
            ("Pending Amount", self.money(statement.pending_amount)),
        ]
    }
}

/// Content of a PDF statement
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStatement {
    pub title: String,
    /// Lines under the title: customer, period
    pub header: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub summary_heading: String,
    /// "Label: amount" lines
    pub summary: Vec<String>,
}

/// A spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Text(String),
    Number(f64),
}

impl SheetCell {
    fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

/// Content of a spreadsheet statement; an empty row is a blank line
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetStatement {
    pub sheet_name: String,
    pub rows: Vec<Vec<SheetCell>>,
    pub column_widths: Vec<f64>,
}

/// Lay out a statement for PDF output
pub fn format_pdf(statement: &StatementResult, meta: &StatementMeta) -> PdfStatement {
    let rows = statement
        .orders
        .iter()
        .map(|order| pdf_row(order, meta))
        .collect();

    PdfStatement {
        title: meta.title.clone(),
        header: vec![meta.customer_line(), meta.period_line()],
        columns: PDF_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        summary_heading: "Summary".to_string(),
        summary: meta
            .summary(statement)
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect(),
    }
}

fn pdf_row(order: &Order, meta: &StatementMeta) -> Vec<String> {
    vec![
        meta.display_date(order.date),
        order.customer_name.clone(),
        meta.money(order.total_amount),
        meta.money(order.paid()),
        meta.money(order.balance()),
        order.status.to_string(),
    ]
}

/// Lay out a statement for spreadsheet output
///
/// Header and summary come first, then the order table. Amount columns are
/// numeric cells so they can be summed in the spreadsheet.
pub fn format_spreadsheet(
    statement: &StatementResult,
    meta: &StatementMeta,
) -> SpreadsheetStatement {
    let mut rows = vec![
        vec![SheetCell::text(&meta.title)],
        vec![SheetCell::text(meta.customer_line())],
        vec![SheetCell::text(meta.period_line())],
        Vec::new(),
        vec![SheetCell::text("Summary")],
    ];

    rows.extend(
        meta.summary(statement)
            .into_iter()
            .map(|(label, value)| vec![SheetCell::text(label), SheetCell::Text(value)]),
    );

    rows.push(Vec::new());
    rows.push(SHEET_COLUMNS.iter().map(|c| SheetCell::text(*c)).collect());

    rows.extend(statement.orders.iter().map(|order| {
        vec![
            SheetCell::Text(meta.display_date(order.date)),
            SheetCell::text(&order.customer_name),
            SheetCell::Text(order.items_summary()),
            SheetCell::Number(order.total_amount.as_f64()),
            SheetCell::Number(order.paid().as_f64()),
            SheetCell::Number(order.balance().as_f64()),
            SheetCell::Text(order.status.to_string()),
        ]
    }));

    SpreadsheetStatement {
        sheet_name: SHEET_NAME.to_string(),
        rows,
        column_widths: SHEET_COLUMN_WIDTHS.to_vec(),
    }
}

/// `Statement_<customer>_<start>_to_<end>.pdf`, customer label kept as is
/// apart from characters a file name cannot hold
pub fn pdf_file_name(meta: &StatementMeta) -> String {
    format!(
        "Statement_{}_{}_to_{}.pdf",
        file_safe(&meta.customer_label),
        meta.start_date,
        meta.end_date
    )
}

/// `Statement_<customer>_<start>_to_<end>.xlsx`
///
/// Only the first space of the customer label becomes an underscore; this
/// matches the names already produced for existing customers.
pub fn xlsx_file_name(meta: &StatementMeta) -> String {
    format!(
        "Statement_{}_{}_to_{}.xlsx",
        file_safe(&meta.customer_label.replacen(' ', "_", 1)),
        meta.start_date,
        meta.end_date
    )
}

/// `Statement_<customer>_<start>_to_<end>.csv`, named like the PDF
pub fn csv_file_name(meta: &StatementMeta) -> String {
    format!(
        "Statement_{}_{}_to_{}.csv",
        file_safe(&meta.customer_label),
        meta.start_date,
        meta.end_date
    )
}

/// Replace path separators and characters Windows rejects in file names.
///
/// The result is always a single path component.
fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
