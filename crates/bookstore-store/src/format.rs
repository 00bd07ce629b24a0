//! Storage format selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::StoreError;

/// The on-disk encoding of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageFormat {
    #[default]
    Json,
    Xml,
}

impl StorageFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Xml => "xml",
        }
    }

    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| StoreError::UnknownFormat(path.display().to_string()))?;
        ext.parse()
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for StorageFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "xml" => Ok(StorageFormat::Xml),
            other => Err(StoreError::UnknownFormat(other.to_string())),
        }
    }
}
