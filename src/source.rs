//! Order data sources
//!
//! A statement is generated from whatever order snapshot the caller has on
//! hand. `StatementSource` is that seam: the JSON `Storage` implements it for
//! the CLI, and `Snapshot` holds orders and customers in memory.

use crate::error::DairyResult;
use crate::models::{Customer, Order};

/// Supplies orders and customers for statement generation
pub trait StatementSource {
    /// Every order in the snapshot, in snapshot order
    fn orders(&self) -> DairyResult<Vec<Order>>;

    fn customers(&self) -> DairyResult<Vec<Customer>>;

    /// True while the snapshot is not ready; generation is refused meanwhile
    fn is_loading(&self) -> bool;
}

/// An in-memory order snapshot
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub loading: bool,
}

impl Snapshot {
    pub fn new(orders: Vec<Order>, customers: Vec<Customer>) -> Self {
        Self {
            orders,
            customers,
            loading: false,
        }
    }
}

impl StatementSource for Snapshot {
    fn orders(&self) -> DairyResult<Vec<Order>> {
        Ok(self.orders.clone())
    }

    fn customers(&self) -> DairyResult<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    fn is_loading(&self) -> bool {
        self.loading
    }
}
