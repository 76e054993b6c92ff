//! Enrichment coordinator: drives summarization for displayed highlights
//!
//! Per highlight the lifecycle is `Idle → Requesting → Applied | Idle`.
//! A request for an id that is already `Requesting` is dropped, not queued.
//! On success the summary is persisted first and only then reflected in the
//! view; on failure nothing is written and the error goes back to the caller.

use crate::config::DEFAULT_MAX_SUMMARY_CHARS;
use crate::highlight::{HighlightId, HighlightPatch};
use crate::repository::{HighlightRepository, RepositoryError};
use crate::summary::{Summarizer, SummaryError};
use crate::view::HighlightView;
use dashmap::DashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from enrichment
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("Failed to store summary: {0}")]
    Repository(#[from] RepositoryError),
}

/// Where a highlight stands with respect to summarization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentState {
    /// No request outstanding and no summary shown
    Idle,
    /// A summary request is outstanding
    Requesting,
    /// A summary is present
    Applied,
}

/// Result of a completed `request` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    /// The summary was generated, stored, and shown
    Applied(String),
    /// A request for this id was already outstanding; nothing was sent
    AlreadyRequesting,
    /// No highlight with this id exists
    NotFound,
}

/// Membership of `id` in the in-flight set, released on drop.
///
/// Dropping covers every exit: success, error return, and the request
/// future itself being dropped before completion.
struct InFlightGuard<'a> {
    in_flight: &'a DashSet<HighlightId>,
    id: HighlightId,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(in_flight: &'a DashSet<HighlightId>, id: &HighlightId) -> Option<Self> {
        in_flight.insert(id.clone()).then(|| Self {
            in_flight,
            id: id.clone(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.id);
    }
}

/// Orchestrates the summarizer against the repository for one popup.
pub struct EnrichmentCoordinator {
    repository: HighlightRepository,
    summarizer: Arc<dyn Summarizer>,
    view: Arc<HighlightView>,
    in_flight: DashSet<HighlightId>,
    expanded: DashSet<HighlightId>,
}

impl EnrichmentCoordinator {
    pub fn new(
        repository: HighlightRepository,
        summarizer: Arc<dyn Summarizer>,
        view: Arc<HighlightView>,
    ) -> Self {
        Self {
            repository,
            summarizer,
            view,
            in_flight: DashSet::new(),
            expanded: DashSet::new(),
        }
    }

    /// Generate and store a summary for `id`.
    ///
    /// Errors affect only this id: nothing is persisted and the id returns
    /// to `Idle`.
    pub async fn request(&self, id: &HighlightId) -> Result<EnrichmentOutcome, EnrichmentError> {
        let Some(record) = self.view.get(id).or_else(|| self.repository.get(id)) else {
            debug!(id = %id, "summary requested for unknown highlight");
            return Ok(EnrichmentOutcome::NotFound);
        };

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, id) else {
            debug!(id = %id, "summary already requested, dropping duplicate");
            return Ok(EnrichmentOutcome::AlreadyRequesting);
        };

        info!(id = %id, "requesting summary");
        let summary = self.summarizer.summarize(&record.text).await.map_err(|e| {
            warn!(id = %id, error = %e, "summary generation failed");
            e
        })?;
        let summary = normalize_summary(&summary).ok_or_else(|| {
            warn!(id = %id, "summarizer returned a blank summary");
            SummaryError::EmptyResult
        })?;

        if !self
            .repository
            .update(id, &HighlightPatch::set_summary(summary.clone()))?
        {
            warn!(id = %id, "highlight deleted while summarizing, discarding summary");
            self.view.remove(id);
            return Ok(EnrichmentOutcome::NotFound);
        }

        self.view.set_summary(id, Some(summary.clone()));
        self.expanded.insert(id.clone());
        info!(id = %id, "summary applied");
        Ok(EnrichmentOutcome::Applied(summary))
    }

    /// Remove the summary from `id`, in storage and in the view.
    ///
    /// Independent of any outstanding request. Returns false if no such
    /// highlight is stored.
    pub fn clear_summary(&self, id: &HighlightId) -> Result<bool, RepositoryError> {
        let cleared = self.repository.update(id, &HighlightPatch::clear_summary())?;
        self.view.set_summary(id, None);
        self.expanded.remove(id);
        Ok(cleared)
    }

    pub fn state(&self, id: &HighlightId) -> EnrichmentState {
        if self.in_flight.contains(id) {
            return EnrichmentState::Requesting;
        }
        match self.view.get(id) {
            Some(record) if record.summary.is_some() => EnrichmentState::Applied,
            _ => EnrichmentState::Idle,
        }
    }

    pub fn is_requesting(&self, id: &HighlightId) -> bool {
        self.in_flight.contains(id)
    }

    /// Whether the summary for `id` should be shown expanded
    pub fn is_expanded(&self, id: &HighlightId) -> bool {
        self.expanded.contains(id)
    }

    /// Number of outstanding requests
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Forget per-id state for a highlight that is no longer shown
    pub fn forget(&self, id: &HighlightId) {
        self.expanded.remove(id);
    }
}

/// Trimmed and capped summary text, or `None` if nothing is left.
fn normalize_summary(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(DEFAULT_MAX_SUMMARY_CHARS).collect())
}
