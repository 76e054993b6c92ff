//! Highlight repository: collection-level operations over `HighlightStore`
//!
//! Every operation loads the full collection, transforms it, and writes the
//! full collection back. The two steps are not atomic: two processes writing
//! the same store can overwrite each other's changes (last writer wins for
//! the whole collection). Within one process, operations awaited one after
//! another always see each other's writes.

use crate::highlight::{HighlightId, HighlightPatch, HighlightRecord};
use crate::storage::{HighlightStore, StorageError};
use thiserror::Error;
use tracing::debug;

/// Errors from repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Highlight already exists: {0}")]
    DuplicateId(HighlightId),

    #[error("Highlight text is empty: {0}")]
    EmptyText(HighlightId),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Newest-first collection of saved highlights
#[derive(Clone)]
pub struct HighlightRepository {
    store: HighlightStore,
}

impl HighlightRepository {
    pub fn new(store: HighlightStore) -> Self {
        Self { store }
    }

    /// Prepend a record and persist.
    ///
    /// The caller supplies the id and timestamp. A record with blank text,
    /// or whose id is already present, is rejected.
    pub fn create(&self, record: HighlightRecord) -> RepositoryResult<()> {
        if record.text.trim().is_empty() {
            return Err(RepositoryError::EmptyText(record.id));
        }

        let mut records = self.store.load_all();
        if records.iter().any(|r| r.id == record.id) {
            return Err(RepositoryError::DuplicateId(record.id));
        }

        debug!(id = %record.id, "creating highlight");
        records.insert(0, record);
        self.store.save_all(&records)?;
        Ok(())
    }

    /// All records, newest first
    pub fn list(&self) -> Vec<HighlightRecord> {
        self.store.load_all()
    }

    /// Look up one record
    pub fn get(&self, id: &HighlightId) -> Option<HighlightRecord> {
        self.store.load_all().into_iter().find(|r| &r.id == id)
    }

    /// Merge `patch` into the record with `id` and persist.
    ///
    /// Returns `false` (and writes nothing) if no record has that id.
    pub fn update(&self, id: &HighlightId, patch: &HighlightPatch) -> RepositoryResult<bool> {
        let mut records = self.store.load_all();
        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            debug!(id = %id, "update skipped, highlight not found");
            return Ok(false);
        };

        if patch.is_empty() {
            return Ok(true);
        }

        record.apply(patch);
        self.store.save_all(&records)?;
        Ok(true)
    }

    /// Remove the record with `id` and persist.
    ///
    /// Returns `false` (and writes nothing) if no record has that id.
    pub fn delete(&self, id: &HighlightId) -> RepositoryResult<bool> {
        let mut records = self.store.load_all();
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            debug!(id = %id, "delete skipped, highlight not found");
            return Ok(false);
        }

        self.store.save_all(&records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use std::sync::Arc;

    fn create_test_repository() -> (HighlightRepository, Arc<MemoryBlobStore>) {
        let blobs = Arc::new(MemoryBlobStore::new());
        let repo = HighlightRepository::new(HighlightStore::new(blobs.clone()));
        (repo, blobs)
    }

    fn record(text: &str) -> HighlightRecord {
        HighlightRecord::new(text, "https://example.com", "Example")
    }

    #[test]
    fn create_prepends_newest_first() {
        let (repo, _) = create_test_repository();
        let r1 = record("first");
        let r2 = record("second");

        repo.create(r1.clone()).unwrap();
        repo.create(r2.clone()).unwrap();

        assert_eq!(repo.list(), vec![r2, r1]);
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let (repo, _) = create_test_repository();
        let r = record("once");
        repo.create(r.clone()).unwrap();

        let err = repo.create(r.clone()).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateId(id) if id == r.id));
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn create_rejects_blank_text() {
        let (repo, blobs) = create_test_repository();

        for text in ["", "  \n\t "] {
            let r = record(text);
            let err = repo.create(r.clone()).unwrap_err();
            assert!(matches!(err, RepositoryError::EmptyText(id) if id == r.id));
        }

        assert!(repo.list().is_empty());
        assert_eq!(blobs.write_count(), 0);
    }

    #[test]
    fn delete_missing_id_is_noop() {
        let (repo, blobs) = create_test_repository();
        repo.create(record("a")).unwrap();
        repo.create(record("b")).unwrap();
        let before = repo.list();
        let writes = blobs.write_count();

        let removed = repo.delete(&HighlightId::from_string("missing")).unwrap();

        assert!(!removed);
        assert_eq!(repo.list(), before);
        assert_eq!(blobs.write_count(), writes);
    }

    #[test]
    fn delete_removes_only_target() {
        let (repo, _) = create_test_repository();
        let keep = record("keep");
        let drop = record("drop");
        repo.create(keep.clone()).unwrap();
        repo.create(drop.clone()).unwrap();

        assert!(repo.delete(&drop.id).unwrap());
        assert_eq!(repo.list(), vec![keep]);
    }

    #[test]
    fn update_is_idempotent() {
        let (repo, _) = create_test_repository();
        let r = record("text");
        repo.create(r.clone()).unwrap();
        let patch = HighlightPatch::set_summary("x");

        repo.update(&r.id, &patch).unwrap();
        let once = repo.list();
        repo.update(&r.id, &patch).unwrap();

        assert_eq!(repo.list(), once);
        assert_eq!(once[0].summary.as_deref(), Some("x"));
    }

    #[test]
    fn update_clear_removes_summary_field() {
        let (repo, _) = create_test_repository();
        let r = record("text").with_summary("old summary");
        repo.create(r.clone()).unwrap();

        assert!(repo.update(&r.id, &HighlightPatch::clear_summary()).unwrap());

        let stored = repo.get(&r.id).unwrap();
        assert!(stored.summary.is_none());
        assert_eq!(stored.text, r.text);
        assert_eq!(stored.url, r.url);
        assert_eq!(stored.title, r.title);
        assert_eq!(stored.timestamp, r.timestamp);
    }

    #[test]
    fn update_missing_id_returns_false() {
        let (repo, _) = create_test_repository();
        let updated = repo
            .update(&HighlightId::from_string("nope"), &HighlightPatch::set_summary("x"))
            .unwrap();
        assert!(!updated);
        assert!(repo.list().is_empty());
    }

    #[test]
    fn write_failure_surfaces_as_storage_error() {
        let (repo, blobs) = create_test_repository();
        blobs.set_fail_writes(true);

        let err = repo.create(record("lost")).unwrap_err();
        assert!(matches!(err, RepositoryError::Storage(_)));

        blobs.set_fail_writes(false);
        assert!(repo.list().is_empty());
    }
}
