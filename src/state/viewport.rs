//! Scroll offset and zoom state of the timeline grid.
//!
//! This module encapsulates the visible portion of the layer/frame grid:
//! the pixel scroll offset and the continuous zoom factor applied to cel
//! sizes.

use egui::Vec2;

/// State related to the visible viewport and zoom.
///
/// Responsibilities:
/// - Holding the scroll offset in pixels (x over frames, y over rows)
/// - Holding the zoom factor applied to frame width and row height
/// - Enforcing the scroll and zoom limits
#[derive(Debug, Clone)]
pub struct ViewportState {
    /// Scroll offset in pixels
    scroll: Vec2,
    /// Zoom factor (1.0 = header box size)
    zoom: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    /// Creates a viewport scrolled to the origin at zoom 1.
    pub fn new() -> Self {
        Self {
            scroll: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    // ===== Viewport Queries =====

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Returns the current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    // ===== Viewport Mutations =====

    /// Sets the scroll offset, clamped to `[0, max_scroll]` on each axis.
    ///
    /// # Returns
    /// `true` if the offset changed.
    pub fn set_scroll(&mut self, scroll: Vec2, max_scroll: Vec2) -> bool {
        let clamped = Vec2::new(
            scroll.x.clamp(0.0, max_scroll.x.max(0.0)),
            scroll.y.clamp(0.0, max_scroll.y.max(0.0)),
        );
        let changed = clamped != self.scroll;
        self.scroll = clamped;
        changed
    }

    /// Sets the zoom factor, clamped to `[min, max]`.
    ///
    /// Inverted limits never panic: `max` wins.
    ///
    /// # Returns
    /// `true` if the zoom changed.
    pub fn set_zoom(&mut self, zoom: f32, min: f32, max: f32) -> bool {
        let clamped = zoom.max(min).min(max);
        let changed = clamped != self.zoom;
        self.zoom = clamped;
        changed
    }
}
