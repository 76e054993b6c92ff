//! Selection tracking and affordance placement

mod placement;
mod tracker;

pub use placement::{PlacementConfig, Position, Rect, Viewport};
pub use tracker::{
    KeyOutcome, KeyPress, SelectionTracker, CANCEL_KEY, MIN_SELECTION_CHARS, PREVIEW_CHARS,
    SAVE_SHORTCUT_KEY,
};
