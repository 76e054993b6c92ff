//! Host capabilities consumed by the core
//!
//! The core never touches a browser, terminal, or clipboard directly. Each
//! environment supplies these narrow interfaces; tests supply fakes.

use crate::selection::{Rect, Viewport};
use std::time::Duration;
use thiserror::Error;

/// How long a notification stays on screen before dismissing itself
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Errors reported by host capabilities
#[derive(Debug, Error)]
pub enum HostError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("cannot open url: {0}")]
    OpenUrl(String),
}

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A text selection as reported by the page
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected text, untrimmed
    pub text: String,
    /// Bounding rectangle of the first selected range, in viewport coordinates
    pub bounds: Rect,
}

/// The page hosting the selection tracker
pub trait Page: Send + Sync {
    /// The current selection, or `None` if nothing is selected
    fn selection(&self) -> Option<Selection>;

    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Address of the page
    fn url(&self) -> String;

    /// Document title of the page
    fn title(&self) -> String;
}

/// Fire-and-forget notification sink.
///
/// Implementations dismiss each notification after
/// [`NOTIFICATION_DURATION`] and must not block the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Write-only clipboard
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), HostError>;
}

/// Opens a URL in a new browsing context
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), HostError>;
}
