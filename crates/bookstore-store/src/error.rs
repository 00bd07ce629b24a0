//! # Store Error Types
//!
//! Error types for loading and saving the catalog.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json / quick-xml / toml / CoreError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path context and categorization        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (seed binary, menus) decides how to surface it                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bookstore_core::CoreError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence and configuration errors.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // File Errors
    // =========================================================================
    /// Reading or writing a file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full during save
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension names no known format.
    #[error("Unknown storage format: '{0}'. Valid options: json, xml")]
    UnknownFormat(String),

    // =========================================================================
    // Codec Errors
    // =========================================================================
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML encoding failed.
    #[error("XML encoding failed: {0}")]
    XmlEncode(#[from] quick_xml::SeError),

    /// XML decoding failed.
    ///
    /// ## When This Occurs
    /// - Missing `<next_ids>` section
    /// - Non-numeric id, price or balance
    /// - Malformed markup
    #[error("XML decoding failed: {0}")]
    XmlDecode(#[from] quick_xml::DeError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storage configuration.
    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(#[from] toml::de::Error),

    /// Failed to render the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(#[from] toml::ser::Error),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A catalog operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true if the error came from decoding a file's contents.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, StoreError::Json(_) | StoreError::XmlDecode(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::UnknownFormat(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }
}
