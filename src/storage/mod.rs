//! Storage backends for gleaner
//!
//! Highlights persist through a narrow key-value `BlobStore` capability.
//! `SqliteBlobStore` is the persistent implementation; `MemoryBlobStore`
//! backs tests. `HighlightStore` is the only code that reads or writes the
//! highlight collection key.

mod highlights;
mod memory;
mod sqlite;
mod traits;

pub use highlights::{HighlightStore, HIGHLIGHTS_KEY};
pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;
pub use traits::{BlobStore, OpenStore, StorageError, StorageResult};
