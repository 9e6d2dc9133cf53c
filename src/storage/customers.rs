//! Customer repository for JSON storage
//!
//! Manages loading and saving customers to customers.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DairyError;
use crate::models::{Customer, CustomerId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CustomerData {
    customers: Vec<Customer>,
}

/// Repository for customer persistence
pub struct CustomerRepository {
    path: PathBuf,
    data: RwLock<HashMap<CustomerId, Customer>>,
}

impl CustomerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load customers from disk
    pub fn load(&self) -> Result<(), DairyError> {
        let file_data: CustomerData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for customer in file_data.customers {
            data.insert(customer.id.clone(), customer);
        }

        Ok(())
    }

    /// Save customers to disk
    pub fn save(&self) -> Result<(), DairyError> {
        let customers = self.get_all()?;
        write_json_atomic(&self.path, &CustomerData { customers })
    }

    pub fn get(&self, id: &CustomerId) -> Result<Option<Customer>, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(id).cloned())
    }

    /// All customers sorted by name
    pub fn get_all(&self) -> Result<Vec<Customer>, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut customers: Vec<_> = data.values().cloned().collect();
        customers.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(customers)
    }

    /// Get a customer by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a customer
    pub fn upsert(&self, customer: Customer) -> Result<(), DairyError> {
        let mut data = self.data.write().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(customer.id.clone(), customer);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, DairyError> {
        let data = self.data.read().map_err(|e| {
            DairyError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CustomerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CustomerRepository::new(temp_dir.path().join("customers.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_find() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let customer = Customer::new("Ramesh Patel");
        let id = customer.id.clone();
        repo.upsert(customer).unwrap();

        assert_eq!(repo.get(&id).unwrap().unwrap().name, "Ramesh Patel");
        assert_eq!(repo.find_by_name("ramesh patel").unwrap().unwrap().id, id);
        assert!(repo.find_by_name("Sita").unwrap().is_none());
    }

    #[test]
    fn test_get_all_sorted_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Customer::new("sita")).unwrap();
        repo.upsert(Customer::new("Amit")).unwrap();
        repo.upsert(Customer::new("Meena")).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Amit", "Meena", "sita"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let customer = Customer::with_id(CustomerId::from("c1"), "Sita");
        repo.upsert(customer.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = CustomerRepository::new(temp_dir.path().join("customers.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(&CustomerId::from("c1")).unwrap(), Some(customer));
    }
}
