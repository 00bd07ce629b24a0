//! # bookstore-store: File Persistence for the Bookstore
//!
//! Loads the catalog from a single JSON or XML data file and writes it back
//! wholesale at save points.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Data Flow                              │
//! │                                                                         │
//! │  Caller (menus, seed binary)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bookstore-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │    Codecs     │    │    Config    │  │   │
//! │  │   │ (storage.rs)  │    │  (codec/*)    │    │ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ load / save   │───►│ JsonCodec     │    │ data_dir     │  │   │
//! │  │   │ temp + rename │    │ XmlCodec      │    │ file_stem    │  │   │
//! │  │   │               │    │               │    │ format       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Data File                                │   │
//! │  │         ~/.local/share/bookstore/bookstore.json                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Data file load / save
//! - [`codec`] - JSON and XML encodings of a catalog snapshot
//! - [`config`] - Storage configuration (TOML)
//! - [`format`] - Format selection by name or extension
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_store::{Storage, StorageConfig};
//!
//! let storage = Storage::new(StorageConfig::load_or_default(None))?;
//! let mut store = storage.load().await?;
//! // ... catalog operations ...
//! storage.save(&store).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use codec::{codec_for, JsonCodec, SnapshotCodec, XmlCodec};
pub use config::StorageConfig;
pub use error::{StoreError, StoreResult};
pub use format::StorageFormat;
pub use storage::Storage;
