//! Redraw requests accumulated while handling events.

use egui::Rect;

/// Regions of the widget that need repainting, drained by the host after
/// each event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invalidation {
    rects: Vec<Rect>,
    full: bool,
    relayout: bool,
    marching_ants_only: bool,
}

impl Invalidation {
    /// Requests a repaint of `rect` (widget coordinates). Empty rects are ignored.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_positive() {
            self.rects.push(rect);
            self.marching_ants_only = false;
        }
    }

    /// Requests a repaint of the whole widget.
    pub fn all(&mut self) {
        self.full = true;
        self.marching_ants_only = false;
    }

    /// The separator or tag bands moved; the host must lay out again.
    pub fn relayout(&mut self) {
        self.relayout = true;
        self.all();
    }

    /// Flags the pending rects as ants-only; cleared by any later request.
    pub(crate) fn mark_marching_ants_only(&mut self) {
        self.marching_ants_only = true;
    }

    pub fn is_empty(&self) -> bool {
        !self.full && self.rects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn needs_relayout(&self) -> bool {
        self.relayout
    }

    /// Only the clipboard outline moved; a full repaint can be skipped.
    pub fn marching_ants_only(&self) -> bool {
        self.marching_ants_only
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Union of all requested rects, or `None` for nothing/full repaint.
    pub fn bounding_rect(&self) -> Option<Rect> {
        if self.full {
            return None;
        }
        self.rects.iter().copied().reduce(|a, b| a.union(b))
    }
}
