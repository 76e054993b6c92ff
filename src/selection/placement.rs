//! Where to draw the save affordance relative to a selection

/// Axis-aligned rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Visible area of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of the affordance
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Affordance geometry
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Fixed affordance width
    pub width: f64,
    /// Horizontal gap between selection and affordance
    pub gap: f64,
    /// Space kept free at the viewport's right edge
    pub margin_right: f64,
    /// Minimum distance from the viewport's top edge
    pub margin_top: f64,
    /// Height assumed when checking for bottom overflow
    pub estimated_height: f64,
    /// Space kept free at the viewport's bottom edge
    pub margin_bottom: f64,
    /// Distance from the viewport bottom when pinned
    pub bottom_offset: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            width: 280.0,
            gap: 20.0,
            margin_right: 20.0,
            margin_top: 20.0,
            estimated_height: 100.0,
            margin_bottom: 20.0,
            bottom_offset: 120.0,
        }
    }
}

impl PlacementConfig {
    /// Compute the affordance position for a selection.
    ///
    /// Horizontally the affordance sits `gap` to the right of the selection,
    /// or ends `gap` to the left of it when the right side would overflow.
    /// There is no second fallback: a selection hugging both edges can push
    /// the affordance off the left side.
    ///
    /// Vertically it aligns with the selection top, clamped to `margin_top`,
    /// or is pinned `bottom_offset` above the viewport bottom when it would
    /// overflow there.
    pub fn place(&self, selection: Rect, viewport: Viewport) -> Position {
        let mut x = selection.right + self.gap;
        if x + self.width > viewport.width - self.margin_right {
            x = selection.left - self.width - self.gap;
        }

        let mut y = selection.top;
        if y < self.margin_top {
            y = self.margin_top;
        } else if y + self.estimated_height > viewport.height - self.margin_bottom {
            y = viewport.height - self.bottom_offset;
        }

        Position { x, y }
    }
}
