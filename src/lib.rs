//! Gleaner: save highlighted passages from web pages
//!
//! Captures selected text together with where it came from, keeps the
//! collection in a local key-value store, and can enrich a saved passage
//! with a generated summary.
//!
//! # Components
//!
//! - **Selection tracking**: decides when to offer saving and where to draw
//!   the save affordance
//! - **Storage**: the highlight collection, always read and written whole
//! - **Repository**: create, list, update and delete over that collection
//! - **Summaries**: a client for the remote generation service
//! - **Enrichment**: runs summaries against stored highlights, one request
//!   per highlight at a time
//!
//! # Example
//!
//! ```
//! use gleaner::{HighlightRecord, HighlightRepository, HighlightStore, MemoryBlobStore};
//! use std::sync::Arc;
//!
//! let repository = HighlightRepository::new(HighlightStore::new(Arc::new(MemoryBlobStore::new())));
//! repository
//!     .create(HighlightRecord::new("hello world", "https://example.com", "Example"))
//!     .unwrap();
//! assert_eq!(repository.list().len(), 1);
//! ```

pub mod config;
pub mod display;
pub mod enrichment;
mod highlight;
pub mod host;
pub mod popup;
mod repository;
pub mod selection;
pub mod storage;
pub mod summary;
mod view;

pub use config::{ConfigError, GenerationConfig, SummaryConfig};
pub use enrichment::{EnrichmentCoordinator, EnrichmentError, EnrichmentOutcome, EnrichmentState};
pub use highlight::{HighlightId, HighlightPatch, HighlightRecord};
pub use host::{ClipboardSink, HostError, Notifier, Page, Selection, Severity, UrlOpener};
pub use popup::{PopupHost, PopupSession};
pub use repository::{HighlightRepository, RepositoryError, RepositoryResult};
pub use selection::{KeyOutcome, KeyPress, PlacementConfig, Position, Rect, SelectionTracker, Viewport};
pub use storage::{BlobStore, HighlightStore, MemoryBlobStore, OpenStore, SqliteBlobStore, StorageError, StorageResult};
pub use summary::{GeminiClient, MockSummarizer, Summarizer, SummaryError};
pub use view::HighlightView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
