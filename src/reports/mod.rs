//! Reports module for dairy-statement
//!
//! Provides the customer statement: filtered orders with payment totals.

pub mod statement;

pub use statement::{StatementRequest, StatementResult};
