//! Highlight collection adapter over a blob store

use super::traits::{BlobStore, StorageResult};
use crate::highlight::HighlightRecord;
use std::sync::Arc;
use tracing::{error, warn};

/// Key under which the highlight collection is stored
pub const HIGHLIGHTS_KEY: &str = "highlights";

/// The sole boundary between highlight records and persistent storage.
///
/// The collection is always read and written as a single JSON array.
/// There are no per-record operations at this layer.
#[derive(Clone)]
pub struct HighlightStore {
    blobs: Arc<dyn BlobStore>,
}

impl HighlightStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Load the whole collection.
    ///
    /// An absent key, a failed read, or an unparseable value all yield an
    /// empty collection. Failures are logged, not returned.
    pub fn load_all(&self) -> Vec<HighlightRecord> {
        let raw = match self.blobs.get(HIGHLIGHTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = HIGHLIGHTS_KEY, error = %e, "failed to load highlights");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = HIGHLIGHTS_KEY, error = %e, "stored highlights are not readable");
                Vec::new()
            }
        }
    }

    /// Replace the whole collection.
    ///
    /// A failed write is returned to the caller; the previously stored
    /// collection is left as it was.
    pub fn save_all(&self, records: &[HighlightRecord]) -> StorageResult<()> {
        let raw = serde_json::to_string(records)?;
        self.blobs.set(HIGHLIGHTS_KEY, &raw).map_err(|e| {
            error!(key = HIGHLIGHTS_KEY, error = %e, "failed to save highlights");
            e
        })
    }
}
