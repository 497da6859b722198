//! Selection ranges over the layer/frame grid.

use serde::{Deserialize, Serialize};

/// Which axes of a [`Range`] are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangeType {
    #[default]
    None,
    Layers,
    Frames,
    Cels,
}

/// Inclusive, normalized index bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub first: i32,
    pub last: i32,
}

impl Bounds {
    /// Builds bounds from two corners in any order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    pub fn single(index: i32) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    pub fn contains(&self, index: i32) -> bool {
        index >= self.first && index <= self.last
    }

    /// Number of indices covered.
    pub fn span(&self) -> i32 {
        self.last - self.first + 1
    }

    /// Clamps `index` into the bounds.
    pub fn clamp(&self, index: i32) -> i32 {
        index.clamp(self.first, self.last)
    }

    pub fn shifted(&self, delta: i32) -> Self {
        Self {
            first: self.first + delta,
            last: self.last + delta,
        }
    }
}

/// A selection: layer rows, frame columns, or a rectangle of cels.
///
/// `Layers` ignores the frame bounds and `Frames` ignores the layer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    kind: RangeType,
    layers: Bounds,
    frames: Bounds,
}

impl Range {
    /// A range covering exactly one row, column or cel.
    pub fn single(kind: RangeType, layer: i32, frame: i32) -> Self {
        Self {
            kind,
            layers: Bounds::single(layer),
            frames: Bounds::single(frame),
        }
    }

    pub fn new(kind: RangeType, layers: Bounds, frames: Bounds) -> Self {
        Self {
            kind,
            layers: Bounds::new(layers.first, layers.last),
            frames: Bounds::new(frames.first, frames.last),
        }
    }

    pub fn kind(&self) -> RangeType {
        self.kind
    }

    pub fn enabled(&self) -> bool {
        self.kind != RangeType::None
    }

    pub fn layer_bounds(&self) -> Bounds {
        self.layers
    }

    pub fn frame_bounds(&self) -> Bounds {
        self.frames
    }

    /// Selected layer count; zero when the range does not select layers.
    pub fn layer_count(&self) -> i32 {
        match self.kind {
            RangeType::Layers | RangeType::Cels => self.layers.span(),
            RangeType::None | RangeType::Frames => 0,
        }
    }

    pub fn first_frame(&self) -> i32 {
        self.frames.first
    }

    pub fn last_frame(&self) -> i32 {
        self.frames.last
    }

    pub fn contains_layer(&self, layer: i32) -> bool {
        match self.kind {
            RangeType::Layers | RangeType::Cels => self.layers.contains(layer),
            RangeType::None | RangeType::Frames => false,
        }
    }

    pub fn contains_frame(&self, frame: i32) -> bool {
        match self.kind {
            RangeType::Frames | RangeType::Cels => self.frames.contains(frame),
            RangeType::None | RangeType::Layers => false,
        }
    }

    /// Extends from `self` (the anchor) to the given corner.
    ///
    /// Only the axes meaningful for the range type change.
    pub fn extended_to(&self, layer: i32, frame: i32) -> Self {
        let mut range = *self;
        if matches!(self.kind, RangeType::Layers | RangeType::Cels) {
            range.layers = Bounds::new(self.layers.first, layer);
        }
        if matches!(self.kind, RangeType::Frames | RangeType::Cels) {
            range.frames = Bounds::new(self.frames.first, frame);
        }
        range
    }

    /// Moves the range by whole rows and frames.
    pub fn displaced(&self, layer_delta: i32, frame_delta: i32) -> Self {
        Self {
            kind: self.kind,
            layers: self.layers.shifted(layer_delta),
            frames: self.frames.shifted(frame_delta),
        }
    }

    pub(crate) fn with_layer_bounds(&self, layers: Bounds) -> Self {
        Self::new(self.kind, layers, self.frames)
    }
}

/// Current selection plus the anchor it is being extended from.
///
/// Between `start_range` and the next `start_range`/`clear`, the anchor stays
/// fixed and `end_range` re-derives the current range from it.
#[derive(Debug, Clone, Default)]
pub struct RangeModel {
    current: Range,
    anchor: Range,
}

impl RangeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&self) -> Range {
        self.current
    }

    pub fn anchor(&self) -> Range {
        self.anchor
    }

    pub fn start_range(&mut self, layer: i32, frame: i32, kind: RangeType) {
        self.anchor = Range::single(kind, layer, frame);
        self.current = self.anchor;
    }

    pub fn end_range(&mut self, layer: i32, frame: i32) {
        self.current = self.anchor.extended_to(layer, frame);
    }

    pub fn clear(&mut self) {
        self.current = Range::default();
        self.anchor = Range::default();
    }

    /// Replaces the selection wholesale (undoing a gesture, adopting a drop
    /// result). The anchor becomes the new range.
    pub fn set(&mut self, range: Range) {
        self.current = range;
        self.anchor = range;
    }

    pub(crate) fn replace_both(&mut self, current: Range, anchor: Range) {
        self.current = current;
        self.anchor = anchor;
    }
}
