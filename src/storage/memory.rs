//! In-memory blob store

use super::traits::{BlobStore, StorageError, StorageResult};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Blob store held entirely in memory
///
/// Reads and writes can be made to fail on demand, which lets callers
/// exercise the degraded-read and failed-write paths.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, String>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `get` calls fail (or succeed again)
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make subsequent `set` calls fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable(format!("read of '{}' refused", key)));
        }
        Ok(self.blobs.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable(format!("write of '{}' refused", key)));
        }
        self.blobs.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
