//! Export history for dairy-statement
//!
//! Every statement written to disk is recorded in an append-only JSON-lines
//! log so past exports can be listed later.

mod entry;
mod logger;

pub use entry::ExportRecord;
pub use logger::ExportLogger;
