//! Storage layer for dairy-statement
//!
//! Provides the local JSON order snapshot with atomic writes and automatic
//! directory creation.

pub mod customers;
pub mod file_io;
pub mod orders;

pub use customers::CustomerRepository;
pub use file_io::{read_document, read_json, write_json_atomic};
pub use orders::OrderRepository;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::paths::DairyPaths;
use crate::error::{DairyError, DairyResult};
use crate::models::{Customer, Order};
use crate::source::StatementSource;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: DairyPaths,
    pub orders: OrderRepository,
    pub customers: CustomerRepository,
    loaded: AtomicBool,
}

impl Storage {
    /// Create a new Storage instance; nothing is read until `load_all`
    pub fn new(paths: DairyPaths) -> Result<Self, DairyError> {
        paths.ensure_directories()?;

        Ok(Self {
            orders: OrderRepository::new(paths.orders_file()),
            customers: CustomerRepository::new(paths.customers_file()),
            paths,
            loaded: AtomicBool::new(false),
        })
    }

    pub fn paths(&self) -> &DairyPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), DairyError> {
        self.loaded.store(false, Ordering::SeqCst);
        self.orders.load()?;
        self.customers.load()?;
        self.loaded.store(true, Ordering::SeqCst);

        tracing::debug!(
            orders = self.orders.count()?,
            customers = self.customers.count()?,
            "loaded order snapshot"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DairyError> {
        self.orders.save()?;
        self.customers.save()?;
        Ok(())
    }
}

impl StatementSource for Storage {
    fn orders(&self) -> DairyResult<Vec<Order>> {
        self.orders.get_all()
    }

    fn customers(&self) -> DairyResult<Vec<Customer>> {
        self.customers.get_all()
    }

    fn is_loading(&self) -> bool {
        !self.loaded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DairyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.is_loading());
    }

    #[test]
    fn test_loading_flag_clears_after_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DairyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage.load_all().unwrap();
        assert!(!storage.is_loading());
        assert!(StatementSource::orders(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_failed_load_stays_loading() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DairyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        std::fs::write(paths.orders_file(), "{ not json").unwrap();

        assert!(storage.load_all().is_err());
        assert!(storage.is_loading());
    }

    #[test]
    fn test_save_all_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DairyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage.customers.upsert(Customer::new("Sita")).unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.customers.count().unwrap(), 1);
    }
}
