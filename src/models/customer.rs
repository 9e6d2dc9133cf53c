//! Customer model and the customer filter used by statements

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CustomerId, IdParseError};

/// Label used when a statement covers every customer
pub const ALL_CUSTOMERS_LABEL: &str = "All Customers";

/// A customer of the dairy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
        }
    }

    pub fn with_id(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Customer name cannot be empty".into());
        }
        Ok(())
    }
}

/// Which customers a statement covers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CustomerFilter {
    #[default]
    All,
    Customer(CustomerId),
}

impl CustomerFilter {
    pub fn matches(&self, customer_id: &CustomerId) -> bool {
        match self {
            Self::All => true,
            Self::Customer(id) => id == customer_id,
        }
    }

    /// Display label for headers and filenames.
    ///
    /// An id that is not in `customers` yields an empty label.
    pub fn label(&self, customers: &[Customer]) -> String {
        match self {
            Self::All => ALL_CUSTOMERS_LABEL.to_string(),
            Self::Customer(id) => customers
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for CustomerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Customer(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for CustomerFilter {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(Self::Customer(s.parse()?))
    }
}
