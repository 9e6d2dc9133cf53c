//! Order repository for JSON storage
//!
//! Manages loading and saving orders to orders.json. Orders keep the order
//! they appear in the snapshot file, which is the tie-break order for
//! statements.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DairyError;
use crate::models::{CustomerId, Order};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct OrderData {
    orders: Vec<Order>,
}

/// Repository for order persistence
pub struct OrderRepository {
    path: PathBuf,
    data: RwLock<Vec<Order>>,
}

impl OrderRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load orders from disk
    pub fn load(&self) -> Result<(), DairyError> {
        let file_data: OrderData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = file_data.orders;
        Ok(())
    }

    /// Save orders to disk
    pub fn save(&self) -> Result<(), DairyError> {
        let orders = self.get_all()?;
        write_json_atomic(&self.path, &OrderData { orders })
    }

    /// All orders in snapshot order
    pub fn get_all(&self) -> Result<Vec<Order>, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    pub fn get_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Order>, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .iter()
            .filter(|o| &o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    /// Insert or update an order; an existing order keeps its position
    pub fn upsert(&self, order: Order) -> Result<(), DairyError> {
        let mut data = self.data.write().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order,
            None => data.push(order),
        }
        Ok(())
    }

    /// Upsert a batch of orders, returning how many were new
    pub fn import(&self, orders: Vec<Order>) -> Result<usize, DairyError> {
        let mut data = self.data.write().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut added = 0;
        for order in orders {
            match data.iter_mut().find(|o| o.id == order.id) {
                Some(existing) => *existing = order,
                None => {
                    data.push(order);
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    pub fn count(&self) -> Result<usize, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
