//! Summary service client
//!
//! `Summarizer` is the seam the enrichment coordinator calls through;
//! `GeminiClient` talks to the remote generation service.

mod client;
mod gemini;
mod wire;

pub use client::{MockSummarizer, Summarizer, SummaryError};
pub use gemini::GeminiClient;
