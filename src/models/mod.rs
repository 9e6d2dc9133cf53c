//! Core data models for dairy-statement
//!
//! Orders and customers as supplied by the order system, plus the money and
//! id types they are built from.

pub mod customer;
pub mod ids;
pub mod money;
pub mod order;

pub use customer::{Customer, CustomerFilter, ALL_CUSTOMERS_LABEL};
pub use ids::{CustomerId, OrderId};
pub use money::Money;
pub use order::{Order, OrderItem, OrderStatus};
