//! Popup session: the list of saved highlights and the actions on it
//!
//! The session owns the in-memory view and the enrichment coordinator for
//! as long as the popup is open. Every user action that can fail reports
//! the failure through the notifier as well as returning it.

use crate::enrichment::{EnrichmentCoordinator, EnrichmentError, EnrichmentOutcome};
use crate::highlight::{HighlightId, HighlightRecord};
use crate::host::{ClipboardSink, Notifier, Severity, UrlOpener};
use crate::repository::{HighlightRepository, RepositoryError};
use crate::summary::{Summarizer, SummaryError};
use crate::view::HighlightView;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Host capabilities a popup needs
#[derive(Clone)]
pub struct PopupHost {
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub opener: Arc<dyn UrlOpener>,
}

pub struct PopupSession {
    repository: HighlightRepository,
    view: Arc<HighlightView>,
    coordinator: EnrichmentCoordinator,
    host: PopupHost,
}

impl PopupSession {
    /// Open a session and load the stored collection into view.
    pub fn open(
        repository: HighlightRepository,
        summarizer: Arc<dyn Summarizer>,
        host: PopupHost,
    ) -> Self {
        let view = Arc::new(HighlightView::new());
        let coordinator = EnrichmentCoordinator::new(repository.clone(), summarizer, view.clone());
        let session = Self {
            repository,
            view,
            coordinator,
            host,
        };
        session.reload();
        session
    }

    /// Re-read the stored collection; returns how many records are shown
    pub fn reload(&self) -> usize {
        let records = self.repository.list();
        debug!(count = records.len(), "loaded highlights");
        self.view.replace_all(records);
        self.view.len()
    }

    /// Displayed records matching `search` (all of them for an empty term)
    pub fn highlights(&self, search: &str) -> Vec<HighlightRecord> {
        self.view.filter(search)
    }

    pub fn coordinator(&self) -> &EnrichmentCoordinator {
        &self.coordinator
    }

    pub fn delete(&self, id: &HighlightId) -> Result<bool, RepositoryError> {
        match self.repository.delete(id) {
            Ok(removed) => {
                self.view.remove(id);
                self.coordinator.forget(id);
                Ok(removed)
            }
            Err(e) => {
                error!(id = %id, error = %e, "failed to delete highlight");
                self.host
                    .notifier
                    .notify("Failed to delete highlight", Severity::Error);
                Err(e)
            }
        }
    }

    /// Copy a highlight's text to the clipboard; false if nothing was copied
    pub fn copy(&self, id: &HighlightId) -> bool {
        let Some(record) = self.view.get(id) else {
            return false;
        };
        match self.host.clipboard.write_text(&record.text) {
            Ok(()) => {
                self.host.notifier.notify("Copied!", Severity::Success);
                true
            }
            Err(e) => {
                warn!(id = %id, error = %e, "failed to copy text");
                self.host
                    .notifier
                    .notify("Failed to copy text", Severity::Error);
                false
            }
        }
    }

    /// Open the page a highlight was captured from
    pub fn open_source(&self, id: &HighlightId) -> bool {
        let Some(record) = self.view.get(id) else {
            return false;
        };
        match self.host.opener.open(&record.url) {
            Ok(()) => true,
            Err(e) => {
                warn!(id = %id, error = %e, "failed to open source page");
                self.host
                    .notifier
                    .notify("Failed to open page", Severity::Error);
                false
            }
        }
    }

    /// Generate a summary for a highlight.
    ///
    /// A highlight with no text to summarize is reported as a warning;
    /// every other failure as an error.
    pub async fn summarize(
        &self,
        id: &HighlightId,
    ) -> Result<EnrichmentOutcome, EnrichmentError> {
        self.coordinator.request(id).await.map_err(|e| {
            match &e {
                EnrichmentError::Summary(SummaryError::EmptyInput) => {
                    self.host.notifier.notify(&e.to_string(), Severity::Warning)
                }
                _ => self
                    .host
                    .notifier
                    .notify(&format!("Error: {}", e), Severity::Error),
            }
            e
        })
    }

    /// Remove a highlight's summary.
    pub fn clear_summary(&self, id: &HighlightId) -> Result<bool, RepositoryError> {
        self.coordinator.clear_summary(id).map_err(|e| {
            error!(id = %id, error = %e, "failed to clear summary");
            self.host
                .notifier
                .notify("Failed to remove summary", Severity::Error);
            e
        })
    }
}
