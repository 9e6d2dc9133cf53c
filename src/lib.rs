//! dairy-statement - Customer statements for a dairy delivery business
//!
//! This library filters a snapshot of delivery orders by date range and
//! customer, totals what was ordered, paid and still pending, and renders the
//! result for the terminal or as a PDF, spreadsheet or CSV file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (orders, customers, money)
//! - `source`: The order snapshot seam used by statement generation
//! - `storage`: JSON file storage layer
//! - `reports`: Statement filtering and aggregation
//! - `session`: Current selection and last generated statement
//! - `export`: PDF, XLSX and CSV statement files
//! - `history`: Log of completed exports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use dairy_statement::session::StatementSession;
//! use dairy_statement::source::Snapshot;
//!
//! let mut session = StatementSession::default();
//! let generated = session.generate(&Snapshot::new(orders, customers))?;
//! println!("pending: {}", generated.result.pending_amount);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod history;
pub mod logging;
pub mod models;
pub mod reports;
pub mod session;
pub mod source;
pub mod storage;

pub use error::{DairyError, DairyResult};
