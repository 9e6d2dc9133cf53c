//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with storage and statement generation.

pub mod customer;
pub mod history;
pub mod order;
pub mod statement;

pub use customer::{handle_customer_command, CustomerCommands};
pub use history::handle_history_command;
pub use order::{handle_order_command, OrderCommands};
pub use statement::{handle_statement_command, StatementCommands};
