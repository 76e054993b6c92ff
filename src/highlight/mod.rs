//! Highlight records: the saved passages and their identifiers

mod record;

pub use record::{HighlightId, HighlightPatch, HighlightRecord};
