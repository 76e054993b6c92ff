//! Shared fakes for gleaner scenario tests
//!
//! Every host capability the core consumes has an in-memory stand-in here.

pub mod host;

pub use host::{FakeClipboard, FakePage, FakeUrlOpener, RecordingNotifier};

use gleaner::{HighlightRepository, HighlightStore, MemoryBlobStore};
use std::sync::Arc;

/// Repository over a fresh in-memory blob store
pub fn memory_repository() -> (HighlightRepository, Arc<MemoryBlobStore>) {
    let blobs = Arc::new(MemoryBlobStore::new());
    let repository = HighlightRepository::new(HighlightStore::new(blobs.clone()));
    (repository, blobs)
}
