//! Summarizer contract: turning passage text into a short summary
//!
//! Two implementations:
//! - `GeminiClient`: calls the remote generation endpoint (production)
//! - `MockSummarizer`: returns a preconfigured result (testing)

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Errors from summarization.
///
/// Every failure, including transport and parse faults, maps to one of
/// these kinds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    #[error("No text provided for summarization")]
    EmptyInput,
    #[error("API key validation failed - please check your key ({0})")]
    Authentication(String),
    #[error("{}", remote_message(.status, .message))]
    RemoteService { status: Option<u16>, message: String },
    #[error("No summary generated - no candidates returned")]
    EmptyResult,
}

fn remote_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("API Error ({}): {}", status, message),
        None => format!("API Error: {}", message),
    }
}

/// Produces a summary for a passage.
///
/// Abstracts over transport (HTTP, mock) so the enrichment coordinator
/// does not depend on how the summary is generated.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`. Blank input fails with `SummaryError::EmptyInput`
    /// before anything is sent.
    async fn summarize(&self, text: &str) -> Result<String, SummaryError>;
}

/// Mock summarizer for testing: returns a preconfigured result.
pub struct MockSummarizer {
    result: Result<String, SummaryError>,
    calls: AtomicUsize,
}

impl MockSummarizer {
    /// A summarizer that always returns `summary`.
    pub fn succeeding(summary: impl Into<String>) -> Self {
        Self {
            result: Ok(summary.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A summarizer that always fails with `error`.
    pub fn failing(error: SummaryError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of non-blank inputs received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
