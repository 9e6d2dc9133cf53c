//! Path management for dairy-statement
//!
//! Provides XDG-compliant path resolution for configuration, order data and
//! generated exports.
//!
//! ## Path Resolution Order
//!
//! 1. `DAIRY_STATEMENT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/dairy-statement` or `~/.config/dairy-statement`
//! 3. Windows: `%APPDATA%\dairy-statement`

use std::path::PathBuf;

use crate::error::DairyError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "DAIRY_STATEMENT_DATA_DIR";

/// Manages all paths used by dairy-statement
#[derive(Debug, Clone)]
pub struct DairyPaths {
    base_dir: PathBuf,
}

impl DairyPaths {
    /// Create a new DairyPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DairyError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create DairyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the data directory (~/.config/dairy-statement/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default destination for generated statements
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// JSON-lines log of completed exports
    pub fn export_log(&self) -> PathBuf {
        self.base_dir.join("exports.log")
    }

    pub fn orders_file(&self) -> PathBuf {
        self.data_dir().join("orders.json")
    }

    pub fn customers_file(&self) -> PathBuf {
        self.data_dir().join("customers.json")
    }

    /// Ensure the base, data and exports directories exist
    pub fn ensure_directories(&self) -> Result<(), DairyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DairyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DairyError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| DairyError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }

    /// Check if dairy-statement has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DairyError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                DairyError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("dairy-statement"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DairyError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| DairyError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("dairy-statement"))
}
