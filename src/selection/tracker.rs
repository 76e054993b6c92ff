//! Selection tracker: turns selection and keyboard events into save offers

use super::placement::{PlacementConfig, Position};
use crate::display::truncate_with_ellipsis;
use crate::highlight::HighlightRecord;
use crate::host::{Notifier, Page, Severity};
use crate::repository::HighlightRepository;
use std::sync::Arc;
use tracing::{debug, error};

/// Selections shorter than this (after trimming) are ignored
pub const MIN_SELECTION_CHARS: usize = 3;

/// Characters of the selection shown in the affordance preview
pub const PREVIEW_CHARS: usize = 100;

/// Key pressed together with the control modifier to save directly
pub const SAVE_SHORTCUT_KEY: &str = "i";

/// Key that hides the affordance
pub const CANCEL_KEY: &str = "Escape";

/// A key press delivered by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }

    fn is_save_shortcut(&self) -> bool {
        self.ctrl && self.key == SAVE_SHORTCUT_KEY
    }
}

/// What the page should do with a key press after the tracker saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the browser handle the key as usual
    PassThrough,
    /// Suppress the browser's default handling
    Consumed,
}

/// Watches a page's selection and offers to save it.
///
/// One tracker serves one page. Saving happens only on explicit user
/// confirmation: the affordance's save button or the keyboard shortcut.
pub struct SelectionTracker {
    page: Arc<dyn Page>,
    notifier: Arc<dyn Notifier>,
    repository: HighlightRepository,
    placement: PlacementConfig,
    visible: bool,
    text: String,
    position: Position,
}

impl SelectionTracker {
    pub fn new(
        page: Arc<dyn Page>,
        notifier: Arc<dyn Notifier>,
        repository: HighlightRepository,
    ) -> Self {
        Self {
            page,
            notifier,
            repository,
            placement: PlacementConfig::default(),
            visible: false,
            text: String::new(),
            position: Position::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Trimmed text of the last eligible selection
    pub fn selected_text(&self) -> &str {
        &self.text
    }

    /// Where the affordance is drawn
    pub fn position(&self) -> Position {
        self.position
    }

    /// Shortened selection text for display in the affordance
    pub fn preview(&self) -> String {
        truncate_with_ellipsis(&self.text, PREVIEW_CHARS)
    }

    /// React to a selection change on the page.
    pub fn on_selection_change(&mut self) {
        let Some(selection) = self.page.selection() else {
            self.hide();
            return;
        };
        let Some(text) = eligible_text(&selection.text) else {
            self.hide();
            return;
        };

        self.text = text;
        self.position = self.placement.place(selection.bounds, self.page.viewport());
        self.visible = true;
        debug!(x = self.position.x, y = self.position.y, "offering to save selection");
    }

    /// React to a key press on the page.
    pub fn on_key(&mut self, key: &KeyPress) -> KeyOutcome {
        if key.is_save_shortcut() {
            match self.page.selection().and_then(|s| eligible_text(&s.text)) {
                Some(text) => {
                    self.save_text(text);
                }
                None => self
                    .notifier
                    .notify("Please select some text first", Severity::Warning),
            }
            return KeyOutcome::Consumed;
        }

        if key.key == CANCEL_KEY {
            self.hide();
        }
        KeyOutcome::PassThrough
    }

    /// The user clicked the affordance's save button.
    ///
    /// Returns true if a highlight was stored. The affordance is hidden
    /// either way.
    pub fn confirm_save(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        let saved = self.save_text(self.text.clone());
        self.hide();
        saved
    }

    /// The user closed the affordance without saving
    pub fn dismiss(&mut self) {
        self.hide();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.text.clear();
        self.position = Position::default();
    }

    fn save_text(&self, text: String) -> bool {
        let record = HighlightRecord::new(text, self.page.url(), self.page.title());
        let id = record.id.clone();

        match self.repository.create(record) {
            Ok(()) => {
                debug!(id = %id, "highlight saved");
                self.notifier
                    .notify("Highlight saved! (Ctrl+I)", Severity::Success);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to save highlight");
                self.notifier
                    .notify("Failed to save highlight", Severity::Error);
                false
            }
        }
    }
}

/// Trimmed selection text, if long enough to offer saving
fn eligible_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    (text.chars().count() >= MIN_SELECTION_CHARS).then(|| text.to_string())
}
