//! The timeline widget core: owned interaction state and the operations the
//! event handlers share.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use egui::{CursorIcon, Pos2, Rect, Vec2};

use crate::domain::drag::DragController;
use crate::domain::hit_test::HitTester;
use crate::domain::marching_ants::MarchingAnts;
use crate::domain::toggle_cascade::ToggleCascade;
use crate::domain::viewport_operations::GridGeometry;
use crate::state::{
    Bounds, Hit, HitPart, Invalidation, LayoutState, Range, RangeModel, RangeType, TimelineConfig,
    TimelineState, ViewportState,
};
use crate::traits::{
    ClipboardSource, CommandExecutor, LayerId, LayerTree, PopupMenus, PreferencesStore, TagInfo,
};

/// Host services the timeline reaches while handling an event.
pub struct TimelineHost<'a> {
    pub commands: &'a mut dyn CommandExecutor,
    pub menus: &'a mut dyn PopupMenus,
    pub prefs: &'a mut dyn PreferencesStore,
    pub clipboard: &'a dyn ClipboardSource,
}

/// Shared flag telling document observers that an active-site change was
/// made by the timeline itself and must not be treated as a user edit.
#[derive(Debug, Clone, Default)]
pub struct SiteLock(Rc<Cell<bool>>);

impl SiteLock {
    pub fn is_held(&self) -> bool {
        self.0.get()
    }

    /// Holds the lock until the returned guard is dropped.
    pub(crate) fn acquire(&self) -> SiteGuard {
        let previous = self.0.replace(true);
        SiteGuard {
            flag: Rc::clone(&self.0),
            previous,
        }
    }
}

/// Proof that the site lock is held. Releases it on drop, on every path.
#[derive(Debug)]
pub struct SiteGuard {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for SiteGuard {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// Pointer/keyboard interaction engine of a layers × frames timeline.
///
/// Feed it events with [`Timeline::process_event`], then drain
/// [`Timeline::take_invalidation`] to know what to repaint.
pub struct Timeline {
    pub(crate) config: TimelineConfig,
    pub(crate) layout: LayoutState,
    pub(crate) viewport: ViewportState,
    pub(crate) state: TimelineState,
    pub(crate) range: RangeModel,
    /// Selection before the current gesture, restored when it is aborted
    pub(crate) range_before_gesture: Option<Range>,
    pub(crate) drag: DragController,
    pub(crate) toggles: ToggleCascade,
    pub(crate) ants: MarchingAnts,
    pub(crate) rows: Vec<LayerId>,
    pub(crate) frames: i32,
    pub(crate) tags: Vec<TagInfo>,
    pub(crate) active_layer: Option<LayerId>,
    pub(crate) active_frame: i32,
    /// Part under the pointer
    pub(crate) hot: Hit,
    /// Part pressed by the current gesture
    pub(crate) clk: Hit,
    pub(crate) captured: bool,
    /// Space bar held while the pointer is inside: presses start scrolling
    pub(crate) space_held: bool,
    /// Last pointer position seen, widget coordinates
    pub(crate) pointer: Option<Pos2>,
    pub(crate) visible: bool,
    pub(crate) invalidation: Invalidation,
    pub(crate) site_lock: SiteLock,
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Self {
        let layout = LayoutState::new(&config);
        let ants = MarchingAnts::new(Duration::from_millis(config.marching_ants_interval_ms));
        Self {
            config,
            layout,
            viewport: ViewportState::new(),
            state: TimelineState::Standby,
            range: RangeModel::new(),
            range_before_gesture: None,
            drag: DragController::new(),
            toggles: ToggleCascade::new(),
            ants,
            rows: Vec::new(),
            frames: 0,
            tags: Vec::new(),
            active_layer: None,
            active_frame: 0,
            hot: Hit::default(),
            clk: Hit::default(),
            captured: false,
            space_held: false,
            pointer: None,
            visible: true,
            invalidation: Invalidation::default(),
            site_lock: SiteLock::default(),
        }
    }

    /// Starts showing `doc`, dropping any gesture and selection.
    pub fn attach(&mut self, doc: &dyn LayerTree) {
        self.state = TimelineState::Standby;
        self.captured = false;
        self.range.clear();
        self.range_before_gesture = None;
        self.drag.reset();
        self.hot = Hit::default();
        self.clk = Hit::default();
        self.active_layer = None;
        self.active_frame = 0;
        self.regenerate_rows(doc);
        self.invalidation.all();
    }

    // ===== Queries =====

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn range(&self) -> Range {
        self.range.range()
    }

    pub fn drop_range(&self) -> Range {
        self.drag.drop_range()
    }

    pub fn hot(&self) -> Hit {
        self.hot
    }

    pub fn clicked(&self) -> Hit {
        self.clk
    }

    pub fn has_capture(&self) -> bool {
        self.captured
    }

    pub fn rows(&self) -> &[LayerId] {
        &self.rows
    }

    pub fn active_layer(&self) -> Option<LayerId> {
        self.active_layer
    }

    pub fn active_frame(&self) -> i32 {
        self.active_frame
    }

    pub fn scroll(&self) -> Vec2 {
        self.viewport.scroll()
    }

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }

    /// Widget bounds in screen coordinates, for [`crate::collect_events`].
    pub fn screen_rect(&self) -> Rect {
        self.layout.screen_rect()
    }

    pub fn separator_x(&self) -> f32 {
        self.layout.separator_x()
    }

    pub fn focused_band(&self) -> Option<usize> {
        self.layout.focused_band()
    }

    pub fn marching_ants_phase(&self) -> u8 {
        self.ants.phase()
    }

    pub fn marching_ants(&self) -> &MarchingAnts {
        &self.ants
    }

    /// Handle for document observers to recognise timeline-made site changes.
    pub fn site_lock(&self) -> SiteLock {
        self.site_lock.clone()
    }

    /// Takes the accumulated repaint request.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    /// Mouse cursor for the current gesture and hot part.
    pub fn cursor_icon(&self) -> CursorIcon {
        match self.state {
            TimelineState::Scrolling { .. } => CursorIcon::Grabbing,
            TimelineState::MovingSeparator | TimelineState::MovingOnionskinRange { .. } => {
                CursorIcon::ResizeHorizontal
            }
            TimelineState::MovingRange => CursorIcon::Move,
            _ if self.space_held => CursorIcon::Grab,
            _ => match self.hot.part {
                HitPart::Separator | HitPart::OnionskinRangeLeft | HitPart::OnionskinRangeRight => {
                    CursorIcon::ResizeHorizontal
                }
                HitPart::RangeOutline => CursorIcon::Move,
                HitPart::Tag | HitPart::HeaderGear | HitPart::TagSwitchBandButton => {
                    CursorIcon::PointingHand
                }
                _ => CursorIcon::Default,
            },
        }
    }

    // ===== Host notifications =====

    /// Widget bounds in screen coordinates.
    pub fn set_bounds(&mut self, screen_rect: Rect) {
        self.layout.set_bounds(screen_rect);
        self.clamp_scroll();
        self.invalidation.all();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The clipboard now holds a range of this document; animate it.
    pub fn activate_clipboard_range(&mut self) {
        self.ants.start();
        self.invalidation.all();
    }

    /// The active layer or frame changed.
    ///
    /// Changes made by the timeline itself (while the site lock is held)
    /// are ignored; anything else drops the selection.
    pub fn on_active_site_change(&mut self, layer: Option<LayerId>, frame: i32) {
        if self.site_lock.is_held() {
            return;
        }
        if self.active_layer != layer || self.active_frame != frame {
            self.active_layer = layer;
            self.active_frame = frame;
            self.clear_and_invalidate_range();
            self.invalidation.all();
        }
    }

    // ===== Viewport =====

    /// Scrolls by `delta` pixels, within the grid content.
    pub fn scroll_by(&mut self, delta: Vec2) {
        let geometry = self.geometry();
        if self
            .viewport
            .set_scroll(self.viewport.scroll() + delta, geometry.max_scroll())
        {
            self.invalidation.all();
        }
    }

    /// Changes the zoom by `delta`; see [`Self::set_zoom_and_update`].
    pub fn zoom_by(&mut self, delta: f32, recenter: bool) {
        self.set_zoom_and_update(self.viewport.zoom() + delta, recenter);
    }

    /// Sets the zoom (clamped to the configured limits). With `recenter`
    /// the active cel is scrolled back into view.
    pub fn set_zoom_and_update(&mut self, zoom: f32, recenter: bool) {
        let (min_zoom, max_zoom) = self.config.zoom_limits();
        if !self.viewport.set_zoom(zoom, min_zoom, max_zoom) {
            return;
        }
        self.clamp_scroll();
        if recenter {
            self.show_cel(self.active_layer_index(), Some(self.active_frame));
        }
        self.invalidation.all();
    }

    /// Scrolls the least amount needed to show the given row/frame.
    pub fn show_cel(&mut self, layer: Option<i32>, frame: Option<i32>) {
        let geometry = self.geometry();
        let target = geometry.scroll_to_show(layer, frame);
        if self.viewport.set_scroll(target, geometry.max_scroll()) {
            self.invalidation.all();
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self.geometry().max_scroll();
        self.viewport.set_scroll(self.viewport.scroll(), max);
    }

    // ===== Rows =====

    /// Rebuilds the row list from the document.
    ///
    /// Row indices cached in the selection are remapped through layer ids;
    /// a selection whose rows disappeared is dropped.
    pub fn regenerate_rows(&mut self, doc: &dyn LayerTree) {
        let old_rows = std::mem::replace(&mut self.rows, doc.rows());
        self.frames = doc.frame_count().max(0);
        self.tags = doc.tags();

        let current = remap_layers(&old_rows, &self.rows, self.range.range());
        let anchor = remap_layers(&old_rows, &self.rows, self.range.anchor());
        match (current, anchor) {
            (Some(current), Some(anchor)) => self.range.replace_both(current, anchor),
            (Some(current), None) => self.range.set(current),
            _ => self.range.clear(),
        }
        if let Some(before) = self.range_before_gesture {
            self.range_before_gesture =
                Some(remap_layers(&old_rows, &self.rows, before).unwrap_or_default());
        }

        if self.active_layer.is_some_and(|id| !self.rows.contains(&id)) {
            self.active_layer = None;
        }
        self.clamp_scroll();
        tracing::debug!(rows = self.rows.len(), frames = self.frames, "regenerated timeline rows");
    }

    // ===== Shared helpers for the event handlers =====

    pub(crate) fn geometry(&self) -> GridGeometry {
        let zoom = self.viewport.zoom();
        GridGeometry {
            size: self.layout.size(),
            separator_x: self.layout.separator_x(),
            separator_width: self.config.separator_width,
            icon_width: self.config.header_box_width,
            header_height: self.config.header_box_height,
            band_height: self.config.tag_band_height,
            bands: self.layout.visible_bands(self.total_bands()),
            frame_width: self.config.header_box_width * zoom,
            row_height: self.config.header_box_height * zoom,
            scroll: self.viewport.scroll(),
            rows: self.rows.len() as i32,
            frames: self.frames,
        }
    }

    pub(crate) fn total_bands(&self) -> usize {
        self.tags.iter().map(|t| t.band + 1).max().unwrap_or(0)
    }

    pub(crate) fn tester(&self, onionskin: Option<Bounds>) -> HitTester<'_> {
        HitTester {
            geometry: self.geometry(),
            outline_width: self.config.outline_width,
            handle_width: self.config.onionskin_handle_width,
            range: self.range.range(),
            tags: &self.tags,
            total_bands: self.total_bands(),
            focused_band: self.layout.focused_band(),
            onionskin,
        }
    }

    /// Frames covered by the onion skin, when it is shown.
    pub(crate) fn onionskin_span(&self, prefs: &dyn PreferencesStore) -> Option<Bounds> {
        prefs.onionskin_active().then(|| {
            Bounds::new(
                self.active_frame - prefs.onionskin_prev_frames(),
                self.active_frame + prefs.onionskin_next_frames(),
            )
        })
    }

    /// Row index if `layer` names an existing row.
    pub(crate) fn valid_layer(&self, layer: Option<i32>) -> Option<usize> {
        let row = usize::try_from(layer?).ok()?;
        (row < self.rows.len()).then_some(row)
    }

    pub(crate) fn valid_frame(&self, frame: Option<i32>) -> Option<i32> {
        frame.filter(|f| (0..self.frames).contains(f))
    }

    pub(crate) fn active_layer_index(&self) -> Option<i32> {
        let id = self.active_layer?;
        self.rows.iter().position(|&r| r == id).map(|i| i as i32)
    }

    pub(crate) fn is_frame_active(&self, frame: i32) -> bool {
        self.range.range().contains_frame(frame) || self.active_frame == frame
    }

    pub(crate) fn is_layer_active(&self, layer: i32) -> bool {
        self.range.range().contains_layer(layer) || self.active_layer_index() == Some(layer)
    }

    pub(crate) fn set_active_layer(&mut self, doc: &mut dyn LayerTree, row: usize, _guard: &SiteGuard) {
        let id = self.rows[row];
        if self.active_layer != Some(id) {
            self.active_layer = Some(id);
            doc.set_active_site(self.active_layer, self.active_frame);
        }
    }

    pub(crate) fn set_active_frame(&mut self, doc: &mut dyn LayerTree, frame: i32, _guard: &SiteGuard) {
        if self.active_frame != frame {
            self.active_frame = frame;
            doc.set_active_site(self.active_layer, self.active_frame);
        }
    }

    pub(crate) fn set_hot(&mut self, hit: Hit) {
        if hit != self.hot {
            let old = self.hot;
            self.invalidate_hit(&old);
            self.invalidate_hit(&hit);
            self.hot = hit;
        }
    }

    pub(crate) fn invalidate_hit(&mut self, hit: &Hit) {
        let rect = self.tester(None).part_bounds(hit);
        if let Some(rect) = rect {
            self.invalidation.add(rect);
        }
    }

    pub(crate) fn invalidate_range_bounds(&mut self, range: &Range) {
        let rect = self.tester(None).range_bounds(range);
        if let Some(rect) = rect {
            self.invalidation.add(rect);
        }
    }

    pub(crate) fn invalidate_range(&mut self) {
        let range = self.range.range();
        self.invalidate_range_bounds(&range);
    }

    pub(crate) fn clear_and_invalidate_range(&mut self) {
        if self.range.range().enabled() {
            self.invalidate_range();
            self.range.clear();
        }
    }

    /// Starts a selection of `kind` at the pressed cel, or extends the
    /// existing one of the same kind when the additive modifier is held.
    pub(crate) fn begin_range(&mut self, kind: RangeType, layer: i32, frame: i32, clear_range: bool) {
        if clear_range {
            self.clear_and_invalidate_range();
        }
        if !clear_range && self.range.range().kind() == kind {
            self.range.end_range(layer, frame);
        } else {
            self.range.start_range(layer, frame, kind);
        }
        self.invalidate_range();
    }
}

/// Remaps a range's layer bounds from one row list to another.
fn remap_layers(old_rows: &[LayerId], new_rows: &[LayerId], range: Range) -> Option<Range> {
    if !matches!(range.kind(), RangeType::Layers | RangeType::Cels) {
        return Some(range);
    }
    let bounds = range.layer_bounds();
    let index_of = |row: i32| -> Option<i32> {
        let id = old_rows.get(usize::try_from(row).ok()?)?;
        new_rows.iter().position(|r| r == id).map(|i| i as i32)
    };
    let first = index_of(bounds.first)?;
    let last = index_of(bounds.last)?;
    Some(range.with_layer_bounds(Bounds::new(first, last)))
}
