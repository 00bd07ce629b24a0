//! # Storage Configuration
//!
//! Where the catalog's data file lives and how it is encoded.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit path passed to StorageConfig::load (highest priority)     │
//! │                                                                         │
//! │  2. TOML Config File in the platform config dir                        │
//! │     ~/.config/bookstore/storage.toml (Linux)                           │
//! │     ~/Library/Application Support/org.bookstore.bookstore/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir (or ./data), "bookstore", json                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storage.toml
//! data_dir = "/var/lib/bookstore"
//! file_stem = "bookstore"
//! format = "xml"  # json | xml
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::format::StorageFormat;

/// Data file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the data file. Created on first save.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name without extension.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Encoding of the data file; also picks the extension.
    #[serde(default)]
    pub format: StorageFormat,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "bookstore", "bookstore")
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn default_file_stem() -> String {
    "bookstore".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: default_data_dir(),
            file_stem: default_file_stem(),
            format: StorageFormat::default(),
        }
    }
}

impl StorageConfig {
    /// Creates a config rooted at the given directory.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_store::{StorageConfig, StorageFormat};
    ///
    /// let config = StorageConfig::new("./data").format(StorageFormat::Xml);
    /// assert!(config.data_file().ends_with("bookstore.xml"));
    /// ```
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the file name without extension.
    pub fn file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Sets the encoding.
    pub fn format(mut self, format: StorageFormat) -> Self {
        self.format = format;
        self
    }

    /// Full path of the data file.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", self.file_stem, self.format.extension()))
    }

    /// Loads configuration from a TOML file, falling back to defaults.
    ///
    /// With no explicit path, the platform config dir is tried.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storage config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.validate()?;
        debug!(data_file = %config.data_file().display(), "Storage config resolved");

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storage config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to a TOML file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;

        info!(?path, "Storage config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let stem = self.file_stem.trim();
        if stem.is_empty() {
            return Err(StoreError::InvalidConfig(
                "file_stem must not be empty".into(),
            ));
        }
        if stem.contains(['/', '\\']) {
            return Err(StoreError::InvalidConfig(format!(
                "file_stem must be a plain file name, got: {}",
                self.file_stem
            )));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig("data_dir must not be empty".into()));
        }
        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("storage.toml"))
    }
}
