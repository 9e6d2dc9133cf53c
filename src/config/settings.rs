//! User settings for dairy-statement
//!
//! Manages business branding, currency and date display preferences, the
//! export destination and the default log level.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::DairyPaths;
use crate::error::DairyError;

/// User settings for dairy-statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Business name printed in statement headers
    #[serde(default = "default_business_name")]
    pub business_name: String,

    /// Currency symbol used in statement text
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for order rows (strftime format)
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,

    /// Where exports are written when no directory is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Default tracing filter when `DAIRY_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_business_name() -> String {
    "Jay Goga Milk".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_display_date_format() -> String {
    // en-IN short date: 1/1/2024
    "%-d/%-m/%Y".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            business_name: default_business_name(),
            currency_symbol: default_currency(),
            display_date_format: default_display_date_format(),
            export_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DairyPaths) -> Result<Self, DairyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DairyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DairyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DairyPaths) -> Result<(), DairyError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DairyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| DairyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the directory exports should be written to
    pub fn resolve_export_dir(&self, paths: &DairyPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.exports_dir())
    }

    /// Title line used by every export format
    pub fn statement_title(&self) -> String {
        format!("{} - Statement", self.business_name)
    }
}
