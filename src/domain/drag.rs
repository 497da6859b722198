//! Drop-target preview and commit of range drags.
//!
//! The controller only computes geometry and the drop operation. Moving or
//! copying layers, frames and cels is done by the host's command layer.

use egui::Pos2;

use super::viewport_operations::GridGeometry;
use crate::state::{Range, RangeType};

/// Whether a dropped range is moved or duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOp {
    Move,
    Copy,
}

/// Side of the destination a frames/layers drop inserts on.
///
/// For frames `Before` is to the left; for layers it is above (smaller row
/// index). Cel drops ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPlace {
    Before,
    #[default]
    After,
}

/// A committed range drag, handed to [`crate::traits::CommandExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRequest {
    pub op: DropOp,
    pub source: Range,
    pub destination: Range,
    pub place: DropPlace,
}

/// Tracks where the selected range would land if released now.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    drop_range: Range,
    place: DropPlace,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current drop preview; `RangeType::None` when there is none.
    pub fn drop_range(&self) -> Range {
        self.drop_range
    }

    pub fn place(&self) -> DropPlace {
        self.place
    }

    /// Discards the preview, returning the one that was shown.
    pub fn reset(&mut self) -> Range {
        self.place = DropPlace::default();
        std::mem::take(&mut self.drop_range)
    }

    /// Clamps a hovered cel to the drawable area, allowing one row/frame
    /// past each edge.
    ///
    /// Layer ranges keep the active frame and frame ranges keep the active
    /// layer, since they only move along one axis.
    pub fn pin_target(
        geometry: &GridGeometry,
        kind: RangeType,
        hit: (i32, i32),
        active: (i32, i32),
    ) -> (i32, i32) {
        let (hit_layer, hit_frame) = hit;
        let frame = if kind == RangeType::Layers {
            active.1
        } else {
            let (first, last) = geometry.drawable_frames();
            hit_frame.clamp(first - 1, last + 1)
        };
        let layer = if kind == RangeType::Frames {
            active.0
        } else {
            let (first, last) = geometry.drawable_layers();
            hit_layer.clamp(first - 1, last + 1)
        };
        (layer, frame)
    }

    /// Recomputes the preview for the pointer at `pos` over the pinned
    /// `target` cel.
    ///
    /// `clicked` is the cel grabbed when the drag started. Outside a range
    /// drag the preview is cleared.
    ///
    /// # Returns
    /// The previous preview when it changed, for repainting.
    pub fn update_drop_range(
        &mut self,
        moving: bool,
        range: &Range,
        geometry: &GridGeometry,
        pos: Pos2,
        clicked: (i32, i32),
        target: (i32, i32),
    ) -> Option<Range> {
        let old = self.drop_range;
        if !moving {
            self.reset();
            return (old != self.drop_range).then_some(old);
        }

        let (layer, frame) = target;
        match range.kind() {
            RangeType::None => {
                self.drop_range = Range::default();
            }
            RangeType::Cels => {
                self.drop_range = range.displaced(layer - clicked.0, frame - clicked.1);
                self.place = DropPlace::After;
            }
            RangeType::Frames => {
                self.drop_range = Range::single(RangeType::Frames, layer, frame);
                let middle = geometry.frame_x(frame) + geometry.frame_width / 2.0;
                self.place = if pos.x < middle {
                    DropPlace::Before
                } else {
                    DropPlace::After
                };
            }
            RangeType::Layers => {
                self.drop_range = Range::single(RangeType::Layers, layer, frame);
                let middle = geometry.row_y(layer) + geometry.row_height / 2.0;
                self.place = if pos.y < middle {
                    DropPlace::Before
                } else {
                    DropPlace::After
                };
            }
        }
        (old != self.drop_range).then_some(old)
    }

    /// Builds the drop request for releasing now, if there is a target.
    pub fn commit(&self, source: Range, op: DropOp) -> Option<DropRequest> {
        if !self.drop_range.enabled() {
            return None;
        }
        Some(DropRequest {
            op,
            source,
            destination: self.drop_range,
            place: self.place,
        })
    }
}
