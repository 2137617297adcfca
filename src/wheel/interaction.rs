// SPDX-License-Identifier: MPL-2.0
//! Pointer input abstraction for manual wheel rotation.
//!
//! The renderer translates iced mouse and touch events into
//! [`PointerEvent`]s; the engine turns them into rotation deltas. This
//! keeps the drag logic independent of any concrete event source and
//! testable without a window.

/// A pointer interaction on the wheel surface, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Released,
}

/// Radians of rotation per pixel of drag travel.
pub const DRAG_RADIANS_PER_PIXEL: f32 = 0.01;

/// Tracks the drag anchor between pointer events.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    anchor: Option<(f32, f32)>,
}

impl DragTracker {
    /// Starts a drag at the given position.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.anchor = Some((x, y));
    }

    /// Advances the drag and returns the rotation delta in radians, or
    /// `None` when no drag is active. Rightward and upward travel both
    /// rotate clockwise.
    pub fn motion(&mut self, x: f32, y: f32) -> Option<f32> {
        let (last_x, last_y) = self.anchor?;
        let delta = ((x - last_x) - (y - last_y)) * DRAG_RADIANS_PER_PIXEL;
        self.anchor = Some((x, y));
        Some(delta)
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.anchor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }
}
