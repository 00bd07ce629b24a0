//! # Data File Storage
//!
//! Loads and saves the whole catalog as one file.
//!
//! ## Save Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookStore ──► to_snapshot() ──► codec.encode() ──► bookstore.json.tmp │
//! │                                                          │              │
//! │                                                          ▼ rename       │
//! │                                                   bookstore.json        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bookstore.json ──► codec.decode() ──► BookStore::restore()            │
//! │                                              │                          │
//! │                                              ├──► BookStore             │
//! │                                              └──► issues ──► warn!      │
//! │                                                                         │
//! │  (no file) ──► BookStore::new()                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A half-written temp file never replaces the previous data file.

use bookstore_core::BookStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::codec::codec_for;
use crate::config::StorageConfig;
use crate::error::{StoreError, StoreResult};
use crate::format::StorageFormat;

/// Handle to the configured data file.
///
/// ## Example
/// ```rust,ignore
/// let storage = Storage::new(StorageConfig::new("./data"))?;
/// let mut store = storage.load().await?;
/// store.add_customer("Ivan", "ivan@mail.ru", Money::zero());
/// storage.save(&store).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Creates a storage handle after validating the config.
    pub fn new(config: StorageConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Storage { config })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Path of the configured data file.
    pub fn data_file(&self) -> PathBuf {
        self.config.data_file()
    }

    /// Loads the configured data file; a missing file is an empty catalog.
    pub async fn load(&self) -> StoreResult<BookStore> {
        self.load_from(&self.data_file()).await
    }

    /// Saves to the configured data file.
    pub async fn save(&self, store: &BookStore) -> StoreResult<()> {
        self.save_to(&self.data_file(), store).await
    }

    /// Loads a catalog from any path, picking the codec by extension.
    pub async fn load_from(&self, path: &Path) -> StoreResult<BookStore> {
        let format = StorageFormat::from_path(path)?;

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No data file, starting with an empty catalog");
                return Ok(BookStore::new());
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let snapshot = codec_for(format).decode(&contents)?;
        let restored = BookStore::restore(snapshot);
        for issue in &restored.issues {
            warn!(path = %path.display(), %issue, "Skipped data while loading");
        }

        let store = restored.store;
        info!(
            path = %path.display(),
            %format,
            authors = store.authors().count(),
            books = store.books().count(),
            customers = store.customers().count(),
            orders = store.orders().count(),
            "Catalog loaded"
        );
        Ok(store)
    }

    /// Saves a catalog to any path, picking the codec by extension.
    ///
    /// Parent directories are created as needed.
    pub async fn save_to(&self, path: &Path, store: &BookStore) -> StoreResult<()> {
        let format = StorageFormat::from_path(path)?;
        let contents = codec_for(format).encode(&store.to_snapshot())?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = temp_path(path);
        debug!(tmp = %tmp.display(), bytes = contents.len(), "Writing temp file");
        tokio::fs::write(&tmp, contents.as_bytes())
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            // Leave the old data file alone and clean up
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(path, e));
        }

        info!(
            path = %path.display(),
            %format,
            books = store.books().count(),
            orders = store.orders().count(),
            "Catalog saved"
        );
        Ok(())
    }
}

/// `bookstore.json` -> `bookstore.json.tmp`, in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
