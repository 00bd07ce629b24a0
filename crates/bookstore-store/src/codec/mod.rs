//! # Snapshot Codecs
//!
//! A codec turns a [`CatalogSnapshot`] into file contents and back. Both
//! codecs carry the same fields, so a catalog loaded from one format can be
//! saved in the other without losing anything.
//!
//! ```text
//! ┌──────────────┐  encode   ┌──────────────┐
//! │  Catalog     │ ────────► │  JSON / XML  │
//! │  Snapshot    │ ◄──────── │  text        │
//! └──────────────┘  decode   └──────────────┘
//! ```

pub mod json;
pub mod xml;

use bookstore_core::CatalogSnapshot;

use crate::error::StoreResult;
use crate::format::StorageFormat;

pub use json::JsonCodec;
pub use xml::XmlCodec;

/// Text encoding of a catalog snapshot.
pub trait SnapshotCodec {
    /// The format this codec reads and writes.
    fn format(&self) -> StorageFormat;

    fn encode(&self, snapshot: &CatalogSnapshot) -> StoreResult<String>;

    fn decode(&self, contents: &str) -> StoreResult<CatalogSnapshot>;
}

/// Returns the codec for a format.
pub fn codec_for(format: StorageFormat) -> Box<dyn SnapshotCodec + Send + Sync> {
    match format {
        StorageFormat::Json => Box::new(JsonCodec),
        StorageFormat::Xml => Box::new(XmlCodec),
    }
}
