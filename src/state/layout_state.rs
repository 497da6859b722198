//! Timeline layout configuration and per-widget layout state.

use serde::{Deserialize, Serialize};

/// Layout metrics and limits of the timeline widget.
///
/// Persisted through [`crate::app::SettingsCoordinator`] as JSON; missing
/// fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Width of a header icon box and of a frame column at zoom 1
    pub header_box_width: f32,
    /// Height of the header row and of a layer row at zoom 1
    pub header_box_height: f32,
    /// Height of one tag band above the header
    pub tag_band_height: f32,
    /// Width of the draggable separator between labels and cels
    pub separator_width: f32,
    /// Thickness of the grabbable range outline, on each side of its border
    pub outline_width: f32,
    /// Grab tolerance around an onion-skin range edge
    pub onionskin_handle_width: f32,
    /// Initial separator position
    pub separator_x: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Marching-ants tick period
    pub marching_ants_interval_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            header_box_width: 12.0,
            header_box_height: 12.0,
            tag_band_height: 12.0,
            separator_width: 4.0,
            outline_width: 2.0,
            onionskin_handle_width: 3.0,
            separator_x: 100.0,
            min_zoom: 1.0,
            max_zoom: 10.0,
            marching_ants_interval_ms: 100,
        }
    }
}

impl TimelineConfig {
    /// Zoom limits as an ordered `(min, max)` pair.
    ///
    /// Stored configs are host data, so swapped limits are put back in order.
    pub fn zoom_limits(&self) -> (f32, f32) {
        if self.min_zoom <= self.max_zoom {
            (self.min_zoom, self.max_zoom)
        } else {
            (self.max_zoom, self.min_zoom)
        }
    }
}

/// Mutable layout of one timeline widget.
#[derive(Debug, Clone)]
pub struct LayoutState {
    /// Widget size in pixels
    size: egui::Vec2,
    /// Screen position of the widget's top-left corner
    origin: egui::Pos2,
    /// X position of the separator
    separator_x: f32,
    /// Tag band shown alone, if one is focused
    focused_band: Option<usize>,
}

impl LayoutState {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            size: egui::Vec2::ZERO,
            origin: egui::Pos2::ZERO,
            separator_x: config.separator_x,
            focused_band: None,
        }
    }

    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    pub fn origin(&self) -> egui::Pos2 {
        self.origin
    }

    pub fn separator_x(&self) -> f32 {
        self.separator_x
    }

    pub fn focused_band(&self) -> Option<usize> {
        self.focused_band
    }

    /// Widget bounds in screen coordinates.
    pub fn screen_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(self.origin, self.size)
    }

    pub fn set_bounds(&mut self, screen_rect: egui::Rect) {
        self.origin = screen_rect.min;
        self.size = screen_rect.size();
    }

    /// Moves the separator; negative positions are clamped to zero.
    pub fn set_separator_x(&mut self, x: f32) {
        self.separator_x = x.max(0.0);
    }

    /// Focuses `band`, or shows all bands again when it is already focused.
    pub fn toggle_focused_band(&mut self, band: usize) {
        self.focused_band = match self.focused_band {
            Some(_) => None,
            None => Some(band),
        };
    }

    /// Number of tag band strips drawn given the document's band count.
    pub fn visible_bands(&self, total_bands: usize) -> usize {
        match self.focused_band {
            Some(_) if total_bands > 0 => 1,
            _ => total_bands,
        }
    }
}
