//! JSON codec: the snapshot records as-is, pretty-printed.

use bookstore_core::CatalogSnapshot;

use super::SnapshotCodec;
use crate::error::StoreResult;
use crate::format::StorageFormat;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SnapshotCodec for JsonCodec {
    fn format(&self) -> StorageFormat {
        StorageFormat::Json
    }

    fn encode(&self, snapshot: &CatalogSnapshot) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }

    fn decode(&self, contents: &str) -> StoreResult<CatalogSnapshot> {
        Ok(serde_json::from_str(contents)?)
    }
}
