//! Highlight record representation

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a saved highlight
///
/// Stored as a plain string so collections written by other hosts
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightId(String);

impl HighlightId {
    /// Create a new random HighlightId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HighlightId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HighlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A passage captured from a web page
///
/// Everything except `summary` is fixed at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRecord {
    /// Captured passage (non-empty)
    pub text: String,
    /// Source page URL
    pub url: String,
    /// Source page title
    pub title: String,
    /// Capture instant, serialized as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub id: HighlightId,
    /// Generated summary, absent until enrichment succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl HighlightRecord {
    /// Capture a passage now, with a fresh id and no summary.
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// stored with.
    pub fn new(text: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            title: title.into(),
            timestamp: Utc::now().trunc_subsecs(3),
            id: HighlightId::new(),
            summary: None,
        }
    }

    /// Override the capture instant (kept to millisecond precision)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(3);
        self
    }

    /// Attach a summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Case-insensitive substring match against text or title.
    ///
    /// An empty term matches every record.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.text.to_lowercase().contains(&term) || self.title.to_lowercase().contains(&term)
    }

    /// Shallow-merge a patch into this record.
    pub fn apply(&mut self, patch: &HighlightPatch) {
        if let Some(summary) = &patch.summary {
            self.summary = summary.clone();
        }
    }
}

/// Partial update for a highlight record
///
/// Only the summary is mutable. `None` leaves the field untouched;
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightPatch {
    pub summary: Option<Option<String>>,
}

impl HighlightPatch {
    pub fn set_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(Some(summary.into())),
        }
    }

    pub fn clear_summary() -> Self {
        Self {
            summary: Some(None),
        }
    }

    /// True if applying this patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
    }
}
