//! Snapshot and import file handling
//!
//! The order snapshot lives in JSON files that are replaced atomically on
//! save. Import files may be JSON or YAML; the extension decides which.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::DairyError;

/// Serialization format of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` (any case) is YAML, everything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    fn parse<T: DeserializeOwned>(self, text: &str, path: &Path) -> Result<T, DairyError> {
        match self {
            Self::Json => serde_json::from_str(text)
                .map_err(|e| DairyError::Json(format!("Failed to parse {}: {}", path.display(), e))),
            Self::Yaml => serde_yaml::from_str(text)
                .map_err(|e| DairyError::Yaml(format!("Failed to parse {}: {}", path.display(), e))),
        }
    }
}

fn storage_err(what: &str, path: &Path, e: impl fmt::Display) -> DairyError {
    DairyError::Storage(format!("{} {}: {}", what, path.display(), e))
}

fn read_text(path: &Path) -> Result<String, DairyError> {
    let mut text = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut text))
        .map_err(|e| DairyError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(text)
}

/// Read a snapshot file
///
/// A missing or blank file is an empty snapshot. A file that does not parse
/// is reported as a storage error so it is never silently overwritten.
pub fn read_json<T, P>(path: P) -> Result<T, DairyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let text = read_text(path)?;
    if text.trim().is_empty() {
        return Ok(T::default());
    }

    DocumentFormat::Json
        .parse(&text, path)
        .map_err(|e| DairyError::Storage(format!("Corrupt snapshot file. {}", e)))
}

/// Read an import document as JSON or YAML, chosen by file extension
///
/// The file must exist.
pub fn read_document<T, P>(path: P) -> Result<T, DairyError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = read_text(path)?;
    DocumentFormat::from_path(path).parse(&text, path)
}

/// Hidden sibling used while a snapshot file is being replaced
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace a snapshot file atomically
///
/// Data is written and synced to a staging file in the same directory, then
/// renamed over the target; readers see either the old or the new snapshot.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), DairyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| storage_err("Failed to create directory for", path, e))?;
    }

    let staging = staging_path(path);
    let written = File::create(&staging)
        .map_err(|e| storage_err("Failed to stage", path, e))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, data)
                .map_err(|e| storage_err("Failed to serialize", path, e))?;
            writer
                .flush()
                .and_then(|_| writer.get_ref().sync_all())
                .map_err(|e| storage_err("Failed to sync", path, e))
        })
        .and_then(|_| {
            fs::rename(&staging, path).map_err(|e| storage_err("Failed to replace", path, e))
        });

    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}
