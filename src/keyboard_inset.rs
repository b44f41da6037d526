//! Keyboard avoidance for scrollable forms
//!
//! When the on-screen keyboard appears it covers the bottom of the view.
//! Scrollable content gets a bottom inset of the visible keyboard height so
//! the focused field can still be scrolled into view.

/// Content insets of a scrollable view, in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    fn bottom(bottom: f64) -> Self {
        Self { bottom, ..Self::ZERO }
    }
}

/// Computes the content insets for the current keyboard visibility.
///
/// A hidden keyboard resets every edge to zero. A shown keyboard insets the
/// bottom edge by its height, minus the part already covered by the safe
/// area. The result is never negative.
pub fn keyboard_insets(shown: bool, keyboard_height: f64, safe_area_bottom: f64) -> EdgeInsets {
    if !shown {
        return EdgeInsets::ZERO;
    }

    let mut height = keyboard_height;
    if keyboard_height > 0.0 {
        height -= safe_area_bottom;
    }

    EdgeInsets::bottom(height.max(0.0))
}
