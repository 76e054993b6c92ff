//! In-memory host capabilities

use gleaner::host::HostError;
use gleaner::{ClipboardSink, Notifier, Page, Rect, Selection, Severity, UrlOpener, Viewport};
use std::sync::Mutex;

/// A page whose selection the test controls
pub struct FakePage {
    selection: Mutex<Option<Selection>>,
    viewport: Viewport,
    url: String,
    title: String,
}

impl FakePage {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            selection: Mutex::new(None),
            viewport: Viewport::new(1280.0, 800.0),
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn select(&self, text: &str, bounds: Rect) {
        *self.selection.lock().unwrap() = Some(Selection {
            text: text.to_string(),
            bounds,
        });
    }

    pub fn clear_selection(&self) {
        *self.selection.lock().unwrap() = None;
    }
}

impl Page for FakePage {
    fn selection(&self) -> Option<Selection> {
        self.selection.lock().unwrap().clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<(String, Severity)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.seen.lock().unwrap().push((message.to_string(), severity));
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub contents: Mutex<Option<String>>,
}

impl ClipboardSink for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), HostError> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeUrlOpener {
    pub opened: Mutex<Vec<String>>,
}

impl UrlOpener for FakeUrlOpener {
    fn open(&self, url: &str) -> Result<(), HostError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
