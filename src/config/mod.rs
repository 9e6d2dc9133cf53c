//! Configuration module for dairy-statement
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DairyPaths;
pub use settings::Settings;
