//! Display formatting for terminal output
//!
//! Formats statements, customers and orders for the command line.

pub mod customer;
pub mod order;
pub mod statement;

pub use customer::format_customer_list;
pub use order::format_order_list;
pub use statement::{format_statement, truncate, EMPTY_STATE};
