//! Grid geometry and viewport math.
//!
//! This module provides pure functions for:
//! - Converting between frame/row indices and widget coordinates
//! - Computing part and range rectangles
//! - Turning wheel deltas into zoom and scroll steps
//!
//! These functions are stateless and can be tested independently.

use egui::{pos2, vec2, Modifiers, Rect, Vec2};

use crate::state::{Range, RangeType};

/// Snapshot of everything needed to map between grid cells and pixels.
///
/// Coordinates are relative to the widget's top-left corner. From top to
/// bottom the widget shows the tag bands, the header row and the layer rows;
/// from left to right the row icons and labels, the separator and the frame
/// columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub size: Vec2,
    pub separator_x: f32,
    pub separator_width: f32,
    /// Width of one header/row icon box
    pub icon_width: f32,
    pub header_height: f32,
    pub band_height: f32,
    /// Number of tag band strips drawn
    pub bands: usize,
    pub frame_width: f32,
    pub row_height: f32,
    pub scroll: Vec2,
    pub rows: i32,
    pub frames: i32,
}

/// Icon columns of the left part of the header and of every row.
pub const EYE_COLUMN: usize = 0;
pub const PADLOCK_COLUMN: usize = 1;
pub const CONTINUOUS_COLUMN: usize = 2;
/// Header-only columns.
pub const GEAR_COLUMN: usize = 3;
pub const ONIONSKIN_COLUMN: usize = 4;

impl GridGeometry {
    pub fn tags_height(&self) -> f32 {
        self.bands as f32 * self.band_height
    }

    pub fn header_top(&self) -> f32 {
        self.tags_height()
    }

    pub fn body_top(&self) -> f32 {
        self.tags_height() + self.header_height
    }

    pub fn grid_left(&self) -> f32 {
        self.separator_x + self.separator_width
    }

    /// Frame column under `x`. Not clamped to the document.
    pub fn frame_at(&self, x: f32) -> i32 {
        ((x - self.grid_left() + self.scroll.x) / self.frame_width).floor() as i32
    }

    /// Row under `y`. Not clamped to the document.
    pub fn row_at(&self, y: f32) -> i32 {
        ((y - self.body_top() + self.scroll.y) / self.row_height).floor() as i32
    }

    /// Left edge of a frame column.
    pub fn frame_x(&self, frame: i32) -> f32 {
        self.grid_left() + frame as f32 * self.frame_width - self.scroll.x
    }

    /// Top edge of a row.
    pub fn row_y(&self, row: i32) -> f32 {
        self.body_top() + row as f32 * self.row_height - self.scroll.y
    }

    /// Icon column under `x` in the label area.
    pub fn icon_column_at(&self, x: f32) -> usize {
        (x / self.icon_width).floor().max(0.0) as usize
    }

    pub fn cel_rect(&self, layer: i32, frame: i32) -> Rect {
        Rect::from_min_size(
            pos2(self.frame_x(frame), self.row_y(layer)),
            vec2(self.frame_width, self.row_height),
        )
    }

    /// Header cells of frames `first..=last`.
    pub fn header_frames_rect(&self, first: i32, last: i32) -> Rect {
        Rect::from_min_max(
            pos2(self.frame_x(first), self.header_top()),
            pos2(self.frame_x(last + 1), self.body_top()),
        )
    }

    /// A whole row, label and cels.
    pub fn row_rect(&self, layer: i32) -> Rect {
        Rect::from_min_size(pos2(0.0, self.row_y(layer)), vec2(self.size.x, self.row_height))
    }

    pub fn row_icon_rect(&self, column: usize, layer: i32) -> Rect {
        Rect::from_min_size(
            pos2(column as f32 * self.icon_width, self.row_y(layer)),
            vec2(self.icon_width, self.row_height),
        )
    }

    pub fn header_icon_rect(&self, column: usize) -> Rect {
        Rect::from_min_size(
            pos2(column as f32 * self.icon_width, self.header_top()),
            vec2(self.icon_width, self.header_height),
        )
    }

    pub fn separator_rect(&self) -> Rect {
        Rect::from_min_size(pos2(self.separator_x, 0.0), vec2(self.separator_width, self.size.y))
    }

    /// Size of the visible part of the cel grid.
    pub fn visible_grid_size(&self) -> Vec2 {
        vec2(
            (self.size.x - self.grid_left()).max(0.0),
            (self.size.y - self.body_top()).max(0.0),
        )
    }

    /// Size of the whole cel grid.
    pub fn content_size(&self) -> Vec2 {
        vec2(
            self.frames.max(0) as f32 * self.frame_width,
            self.rows.max(0) as f32 * self.row_height,
        )
    }

    pub fn max_scroll(&self) -> Vec2 {
        (self.content_size() - self.visible_grid_size()).max(Vec2::ZERO)
    }

    /// First and last frame with at least one visible pixel, clamped to the
    /// document.
    pub fn drawable_frames(&self) -> (i32, i32) {
        let first = self.frame_at(self.grid_left()).max(0);
        let last = self.frame_at(self.size.x - 1.0).min(self.frames - 1);
        (first, last.max(first))
    }

    /// First and last row with at least one visible pixel, clamped to the
    /// row list.
    pub fn drawable_layers(&self) -> (i32, i32) {
        let first = self.row_at(self.body_top()).max(0);
        let last = self.row_at(self.size.y - 1.0).min(self.rows - 1);
        (first, last.max(first))
    }

    /// Pixel bounds of a range, or `None` for an empty range.
    pub fn range_rect(&self, range: &Range) -> Option<Rect> {
        let layers = range.layer_bounds();
        let frames = range.frame_bounds();
        match range.kind() {
            RangeType::None => None,
            RangeType::Layers => Some(Rect::from_min_max(
                pos2(0.0, self.row_y(layers.first)),
                pos2(self.size.x, self.row_y(layers.last + 1)),
            )),
            RangeType::Frames => Some(Rect::from_min_max(
                pos2(self.frame_x(frames.first), self.header_top()),
                pos2(self.frame_x(frames.last + 1), self.row_y(self.rows)),
            )),
            RangeType::Cels => Some(Rect::from_min_max(
                pos2(self.frame_x(frames.first), self.row_y(layers.first)),
                pos2(self.frame_x(frames.last + 1), self.row_y(layers.last + 1)),
            )),
        }
    }

    /// Scroll offset that brings the given cel into view, moving as little
    /// as possible. Either index may be `None` to leave that axis alone.
    pub fn scroll_to_show(&self, layer: Option<i32>, frame: Option<i32>) -> Vec2 {
        let visible = self.visible_grid_size();
        let mut scroll = self.scroll;
        if let Some(frame) = frame {
            let left = frame as f32 * self.frame_width;
            let right = left + self.frame_width;
            if left < scroll.x {
                scroll.x = left;
            } else if right > scroll.x + visible.x {
                scroll.x = right - visible.x;
            }
        }
        if let Some(layer) = layer {
            let top = layer as f32 * self.row_height;
            let bottom = top + self.row_height;
            if top < scroll.y {
                scroll.y = top;
            } else if bottom > scroll.y + visible.y {
                scroll.y = bottom - visible.y;
            }
        }
        scroll
    }
}

/// Zoom change requested by a wheel delta (zoom modifier held).
///
/// High-precision deltas (touchpads) are damped and clamped to one step.
/// The returned value is subtracted from the current zoom.
pub fn wheel_zoom_delta(delta: Vec2, precise: bool) -> f32 {
    let mut dz = delta.x + delta.y;
    if precise {
        dz = (dz / 1.5).clamp(-1.0, 1.0);
    }
    dz
}

/// Scroll change requested by a wheel delta (no zoom modifier).
///
/// Stepped deltas are in whole cells: they are scaled by the cel size, the
/// vertical axis is swapped onto the horizontal one while shift is held and
/// there is no horizontal component, and alt triples the step.
pub fn wheel_scroll_delta(
    delta: Vec2,
    precise: bool,
    modifiers: Modifiers,
    frame_width: f32,
    row_height: f32,
) -> Vec2 {
    if precise {
        return delta;
    }
    let mut d = vec2(delta.x * frame_width, delta.y * row_height);
    if d.x == 0.0 && modifiers.shift && d.y.abs() > d.x {
        std::mem::swap(&mut d.x, &mut d.y);
    }
    if modifiers.alt {
        d *= 3.0;
    }
    d
}
