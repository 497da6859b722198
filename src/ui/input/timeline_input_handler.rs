//! Gesture state machine: pointer, keyboard, wheel and timer handling.
//!
//! Every event is routed through [`Timeline::process_event`], which
//! dispatches on the event kind and then on the current
//! [`TimelineState`]. Handlers only touch the document through
//! [`LayerTree`] and the host services in [`TimelineHost`].

use egui::{Key, Modifiers, PointerButton, Pos2, Vec2};
use tracing::{debug, warn};

use super::TimelineEvent;
use crate::domain::drag::{DragController, DropOp};
use crate::domain::marching_ants::AntsTick;
use crate::domain::toggle_cascade::{Solo, ToggleCascade, ToggleOutcome};
use crate::domain::viewport_operations::{wheel_scroll_delta, wheel_zoom_delta};
use crate::error::TimelineError;
use crate::state::{Hit, HitPart, OnionskinSide, RangeType, TimelineState};
use crate::traits::{params, CommandId, LayerFlag, LayerKind, LayerTree, Params, PopupKind};
use crate::ui::{Timeline, TimelineHost};

impl Timeline {
    /// Handles one input event.
    ///
    /// Without a document only timer ticks are processed.
    ///
    /// # Returns
    /// Whether the event was consumed.
    pub fn process_event(
        &mut self,
        event: &TimelineEvent,
        doc: Option<&mut dyn LayerTree>,
        host: &mut TimelineHost<'_>,
    ) -> bool {
        if let TimelineEvent::Tick = event {
            return self.on_tick(doc.as_deref(), host);
        }
        let Some(doc) = doc else {
            return false;
        };

        match *event {
            TimelineEvent::PointerDown { pos, button, modifiers } => {
                self.on_pointer_down(pos, button, modifiers, doc, host)
            }
            TimelineEvent::PointerMove { pos, .. } => self.on_pointer_move(pos, doc, host),
            TimelineEvent::PointerUp { pos, button, modifiers } => {
                self.on_pointer_up(pos, button, modifiers, doc, host)
            }
            TimelineEvent::DoubleClick { pos, .. } => self.on_double_click(pos, doc, host),
            TimelineEvent::PointerLeave => self.on_pointer_leave(),
            TimelineEvent::CaptureLost => self.on_capture_lost(),
            TimelineEvent::KeyDown { key, .. } => self.on_key(key, true, host),
            TimelineEvent::KeyUp { key, .. } => self.on_key(key, false, host),
            TimelineEvent::Wheel { delta, precise, modifiers } => {
                self.on_wheel(delta, precise, modifiers)
            }
            TimelineEvent::TouchMagnify { magnification } => {
                let zoom = self.viewport.zoom();
                self.set_zoom_and_update(zoom + zoom * magnification, true);
                true
            }
            TimelineEvent::Tick => false,
        }
    }

    // ===== Pointer down =====

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
        doc: &mut dyn LayerTree,
        host: &mut TimelineHost<'_>,
    ) -> bool {
        self.pointer = Some(pos);
        self.captured = true;

        if button == PointerButton::Middle || self.space_held {
            self.state = TimelineState::Scrolling { last_pos: pos };
            debug!(?pos, "timeline scroll started");
            return true;
        }

        let onionskin = self.onionskin_span(&*host.prefs);
        let hit = self.tester(onionskin).hit_test(pos);
        self.set_hot(hit);
        self.clk = hit;
        self.range_before_gesture = Some(self.range.range());

        let clear_range = !is_additive(modifiers);

        match hit.part {
            HitPart::Separator => {
                self.state = TimelineState::MovingSeparator;
            }
            HitPart::HeaderEye => self.toggle_header(doc, LayerFlag::Visible),
            HitPart::HeaderPadlock => self.toggle_header(doc, LayerFlag::Editable),
            HitPart::HeaderContinuous => {
                let outcome = ToggleCascade::toggle_rows(doc, &self.rows, LayerFlag::Continuous);
                self.apply_toggle(doc, outcome);
            }
            HitPart::HeaderOnionskin => {
                let active = host.prefs.onionskin_active();
                host.prefs.set_onionskin_active(!active);
                self.invalidation.all();
            }
            HitPart::OnionskinRangeLeft => {
                self.state = TimelineState::MovingOnionskinRange {
                    side: OnionskinSide::Left,
                    original: host.prefs.onionskin_prev_frames(),
                };
            }
            HitPart::OnionskinRangeRight => {
                self.state = TimelineState::MovingOnionskinRange {
                    side: OnionskinSide::Right,
                    original: host.prefs.onionskin_next_frames(),
                };
            }
            HitPart::HeaderFrame => self.press_header_frame(button, clear_range, doc),
            HitPart::RowText => self.press_row_text(button, modifiers, clear_range, doc, host),
            HitPart::RowEyeIcon => self.press_eye(modifiers.alt, doc),
            HitPart::RowPadlockIcon => {
                if let Some(row) = self.valid_layer(hit.layer) {
                    let editable = doc.flag(self.rows[row], LayerFlag::Editable);
                    self.state = TimelineState::painting(LayerFlag::Editable, !editable);
                    self.paint_flag(doc, row);
                }
            }
            HitPart::RowContinuousIcon => self.press_continuous(doc, host),
            HitPart::Cel => self.press_cel(button, modifiers, clear_range, doc, host),
            HitPart::RangeOutline => self.press_range_outline(pos),
            HitPart::None
            | HitPart::HeaderGear
            | HitPart::Tag
            | HitPart::TagBand
            | HitPart::TagSwitchBandButton => {}
        }

        let clk = self.clk;
        self.invalidate_hit(&clk);
        debug!(part = ?clk.part, state = ?self.state, "timeline pointer down");
        true
    }

    fn toggle_header(&mut self, doc: &mut dyn LayerTree, flag: LayerFlag) {
        debug_assert!(doc.has_sprite(), "header toggles need a sprite");
        if !doc.has_sprite() {
            return;
        }
        let outcome = ToggleCascade::toggle_top_level(doc, flag);
        self.apply_toggle(doc, outcome);
    }

    fn apply_toggle(&mut self, doc: &mut dyn LayerTree, outcome: ToggleOutcome) {
        if outcome.regenerate_rows {
            self.regenerate_rows(doc);
        }
        if outcome.changed {
            doc.notify_general_update();
            self.invalidation.all();
        }
    }

    fn press_header_frame(&mut self, button: PointerButton, clear_range: bool, doc: &mut dyn LayerTree) {
        let Some(frame) = self.valid_frame(self.clk.frame) else {
            return;
        };
        if button != PointerButton::Primary && self.is_frame_active(frame) {
            return;
        }
        let guard = self.site_lock.acquire();
        self.state = TimelineState::SelectingFrames;
        let layer = self.active_layer_index().unwrap_or(0);
        self.begin_range(RangeType::Frames, layer, frame, clear_range);
        self.set_active_frame(doc, frame, &guard);
    }

    fn press_row_text(
        &mut self,
        button: PointerButton,
        modifiers: Modifiers,
        clear_range: bool,
        doc: &mut dyn LayerTree,
        host: &mut TimelineHost<'_>,
    ) {
        let Some(row) = self.valid_layer(self.clk.layer) else {
            return;
        };
        let layer = row as i32;
        let guard = self.site_lock.acquire();

        if selects_layer_boundaries(button, modifiers) {
            self.select_layer_boundaries(layer, self.active_frame, modifiers, host);
        } else if button == PointerButton::Primary || !self.is_layer_active(layer) {
            self.state = TimelineState::SelectingLayers;
            self.begin_range(RangeType::Layers, layer, self.active_frame, clear_range);
            if self.active_layer_index() != Some(layer) {
                self.set_active_layer(doc, row, &guard);
                self.invalidation.all();
            }
        }
        self.show_cel(Some(layer), Some(self.active_frame));
    }

    fn press_cel(
        &mut self,
        button: PointerButton,
        modifiers: Modifiers,
        clear_range: bool,
        doc: &mut dyn LayerTree,
        host: &mut TimelineHost<'_>,
    ) {
        let (Some(row), Some(frame)) = (self.valid_layer(self.clk.layer), self.valid_frame(self.clk.frame))
        else {
            return;
        };
        let layer = row as i32;
        let guard = self.site_lock.acquire();

        if selects_layer_boundaries(button, modifiers) {
            self.select_layer_boundaries(layer, frame, modifiers, host);
        } else {
            let select = button == PointerButton::Primary
                || !self.is_layer_active(layer)
                || !self.is_frame_active(frame);
            if select {
                self.state = TimelineState::SelectingCels;
                self.begin_range(RangeType::Cels, layer, frame, clear_range);
            }
            if self.active_layer_index() != Some(layer) || self.active_frame != frame {
                self.set_active_layer(doc, row, &guard);
                self.set_active_frame(doc, frame, &guard);
                self.invalidation.all();
            }
        }
        self.show_cel(Some(layer), Some(self.active_frame));
    }

    fn press_range_outline(&mut self, pos: Pos2) {
        self.state = TimelineState::MovingRange;
        let range = self.range.range();
        if range.kind() != RangeType::Cels {
            return;
        }
        // Grab the cel under the pointer, kept inside the selection
        let mut clk = self.tester(None).hit_test_cel(pos);
        if range.layer_count() > 0 {
            clk.layer = clk.layer.map(|l| range.layer_bounds().clamp(l));
        }
        clk.frame = clk.frame.map(|f| range.frame_bounds().clamp(f));
        self.clk = clk;
    }

    fn press_eye(&mut self, solo: bool, doc: &mut dyn LayerTree) {
        let Some(row) = self.valid_layer(self.clk.layer) else {
            return;
        };
        let layer = self.rows[row];
        let mut restored = false;

        if solo {
            restored = self.toggles.solo(doc, &self.rows) == Solo::Restored;
            self.regenerate_rows(doc);
            doc.notify_general_update();
            self.invalidation.all();
        }

        let visible = doc.flag(layer, LayerFlag::Visible);
        // After a restore the pressed row keeps its restored visibility
        let value = if restored { visible } else { !visible };
        self.state = TimelineState::painting(LayerFlag::Visible, value);

        if let Some(row) = self.rows.iter().position(|&id| id == layer) {
            self.paint_flag(doc, row);
        }
    }

    fn press_continuous(&mut self, doc: &mut dyn LayerTree, host: &mut TimelineHost<'_>) {
        let Some(row) = self.valid_layer(self.clk.layer) else {
            return;
        };
        let layer = self.rows[row];
        let flag = match doc.layer_kind(layer) {
            Some(LayerKind::Image) => LayerFlag::Continuous,
            Some(LayerKind::Group) => LayerFlag::Collapsed,
            None => return,
        };
        let current = doc.flag(layer, flag);
        self.state = TimelineState::painting(flag, !current);
        self.paint_flag(doc, row);

        if flag == LayerFlag::Collapsed {
            // Rows below the group moved; the pressed hit is stale
            self.refresh_hot(host);
            self.clk = self.hot;
        }
    }

    /// Applies the flag the current state paints to one row.
    fn paint_flag(&mut self, doc: &mut dyn LayerTree, row: usize) {
        let Some((flag, value)) = self.state.painted_flag() else {
            return;
        };
        let outcome = ToggleCascade::set_row_flag(doc, self.rows[row], flag, value);
        if outcome.changed {
            let rect = self.geometry().row_rect(row as i32);
            self.invalidation.add(rect);
            if flag == LayerFlag::Visible {
                doc.notify_general_update();
            }
        }
        if outcome.regenerate_rows {
            self.regenerate_rows(doc);
            self.invalidation.all();
        }
    }

    fn select_layer_boundaries(
        &mut self,
        layer: i32,
        frame: i32,
        modifiers: Modifiers,
        host: &mut TimelineHost<'_>,
    ) {
        let op = match (modifiers.shift, modifiers.alt) {
            (true, true) => "intersect",
            (true, false) => "add",
            (false, true) => "subtract",
            (false, false) => "replace",
        };
        let Some(&id) = self.rows.get(layer as usize) else {
            return;
        };
        let params = params([
            ("layer", id.to_string()),
            ("frame", frame.to_string()),
            ("op", op.to_string()),
        ]);
        execute(host, CommandId::SelectLayerBoundaries, &params);
    }

    // ===== Pointer move =====

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut dyn LayerTree, host: &mut TimelineHost<'_>) -> bool {
        self.pointer = Some(pos);
        let onionskin = self.onionskin_span(&*host.prefs);
        let hit = self.tester(onionskin).hit_test(pos);
        self.set_hot(hit);

        if self.captured {
            match self.state {
                TimelineState::Scrolling { last_pos } => {
                    self.scroll_by(last_pos - pos);
                    self.state = TimelineState::Scrolling { last_pos: pos };
                    return true;
                }
                TimelineState::MovingOnionskinRange { side, original } => {
                    self.drag_onionskin(side, original, hit, host);
                    return true;
                }
                TimelineState::MovingSeparator => {
                    self.layout.set_separator_x(pos.x);
                    self.clamp_after_relayout();
                    return true;
                }
                state => {
                    if let Some((flag, _)) = state.painted_flag() {
                        self.paint_over(flag, hit, doc, host);
                    }
                }
            }
        }

        let target = self.update_drop_range(pos);

        if self.captured {
            match self.state {
                TimelineState::MovingRange => {
                    self.show_cel(Some(target.0), Some(target.1));
                }
                TimelineState::SelectingLayers => self.extend_layers(hit, doc),
                TimelineState::SelectingFrames => self.extend_frames(hit, doc),
                TimelineState::SelectingCels => self.extend_cels(hit, doc),
                _ => {}
            }
        }
        true
    }

    fn drag_onionskin(
        &mut self,
        side: OnionskinSide,
        original: i32,
        hit: Hit,
        host: &mut TimelineHost<'_>,
    ) {
        let (Some(pressed), Some(current)) = (self.clk.frame, hit.frame) else {
            return;
        };
        let delta = pressed - current;
        match side {
            OnionskinSide::Left => host.prefs.set_onionskin_prev_frames((original + delta).max(0)),
            OnionskinSide::Right => host.prefs.set_onionskin_next_frames((original - delta).max(0)),
        }
        // The onion skin tints cels too
        self.invalidation.all();
    }

    fn clamp_after_relayout(&mut self) {
        self.scroll_by(Vec2::ZERO);
        self.invalidation.relayout();
    }

    /// Continues a flag-painting gesture over whichever row icon is hovered.
    fn paint_over(&mut self, flag: LayerFlag, hit: Hit, doc: &mut dyn LayerTree, host: &mut TimelineHost<'_>) {
        self.clk = hit;
        let icon = match flag {
            LayerFlag::Visible => HitPart::RowEyeIcon,
            LayerFlag::Editable => HitPart::RowPadlockIcon,
            LayerFlag::Continuous | LayerFlag::Collapsed => HitPart::RowContinuousIcon,
        };
        if hit.part != icon {
            return;
        }
        let Some(row) = self.valid_layer(hit.layer) else {
            return;
        };
        if flag == LayerFlag::Collapsed
            && doc.layer_kind(self.rows[row]) != Some(LayerKind::Group)
        {
            return;
        }
        self.paint_flag(doc, row);
        if flag == LayerFlag::Collapsed {
            self.refresh_hot(host);
            self.clk = self.hot;
        }
    }

    /// Moves the drop preview under the pointer.
    ///
    /// # Returns
    /// The pinned target cel (layer, frame).
    fn update_drop_range(&mut self, pos: Pos2) -> (i32, i32) {
        let geometry = self.geometry();
        let range = self.range.range();
        let cel = self.tester(None).hit_test_cel(pos);
        let active = (self.active_layer_index().unwrap_or(0), self.active_frame);
        let target = DragController::pin_target(
            &geometry,
            range.kind(),
            (cel.layer.unwrap_or(0), cel.frame.unwrap_or(0)),
            active,
        );
        let clicked = (
            self.clk.layer.unwrap_or(target.0),
            self.clk.frame.unwrap_or(target.1),
        );
        let moving = self.captured && self.state == TimelineState::MovingRange;

        if let Some(old) = self
            .drag
            .update_drop_range(moving, &range, &geometry, pos, clicked, target)
        {
            let new = self.drag.drop_range();
            self.invalidate_range_bounds(&old);
            self.invalidate_range_bounds(&new);
        }
        target
    }

    fn clamped_row(&self, layer: Option<i32>) -> Option<usize> {
        let last = self.rows.len().checked_sub(1)?;
        Some(layer?.clamp(0, last as i32) as usize)
    }

    fn clamped_frame(&self, frame: Option<i32>) -> Option<i32> {
        if self.frames <= 0 {
            return None;
        }
        frame.map(|f| f.clamp(0, self.frames - 1))
    }

    fn extend_layers(&mut self, hit: Hit, doc: &mut dyn LayerTree) {
        let Some(row) = self.clamped_row(hit.layer) else {
            return;
        };
        let layer = row as i32;
        if self.active_layer_index() == Some(layer) {
            return;
        }
        let guard = self.site_lock.acquire();
        self.clk.layer = Some(layer);
        self.invalidate_range();
        self.range.end_range(layer, self.active_frame);
        self.invalidate_range();
        self.set_active_layer(doc, row, &guard);
    }

    fn extend_frames(&mut self, hit: Hit, doc: &mut dyn LayerTree) {
        let Some(frame) = self.clamped_frame(hit.frame) else {
            return;
        };
        if self.active_frame == frame {
            return;
        }
        let guard = self.site_lock.acquire();
        self.clk.frame = Some(frame);
        self.invalidate_range();
        self.range
            .end_range(self.active_layer_index().unwrap_or(0), frame);
        self.invalidate_range();
        self.set_active_frame(doc, frame, &guard);
    }

    fn extend_cels(&mut self, hit: Hit, doc: &mut dyn LayerTree) {
        let (Some(row), Some(frame)) = (self.clamped_row(hit.layer), self.clamped_frame(hit.frame))
        else {
            return;
        };
        let layer = row as i32;
        if self.active_layer_index() == Some(layer) && self.active_frame == frame {
            return;
        }
        let guard = self.site_lock.acquire();
        self.clk.layer = Some(layer);
        self.clk.frame = Some(frame);
        self.invalidate_range();
        self.range.end_range(layer, frame);
        self.invalidate_range();
        self.set_active_layer(doc, row, &guard);
        self.set_active_frame(doc, frame, &guard);
    }

    // ===== Pointer up =====

    fn on_pointer_up(
        &mut self,
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
        doc: &mut dyn LayerTree,
        host: &mut TimelineHost<'_>,
    ) -> bool {
        if !self.captured {
            return false;
        }
        self.pointer = Some(pos);

        if !self.state.is_scrolling() {
            let onionskin = self.onionskin_span(&*host.prefs);
            let hit = self.tester(onionskin).hit_test(pos);
            self.set_hot(hit);
            self.release_action(pos, button, doc, host);

            if self.state == TimelineState::MovingRange && self.drag.drop_range().enabled() {
                let op = if modifiers.command || modifiers.ctrl || modifiers.alt {
                    DropOp::Copy
                } else {
                    DropOp::Move
                };
                self.commit_drop(op, doc, host);
            }
        }

        self.end_gesture();
        true
    }

    /// Popups and commands triggered by releasing over the hot part.
    fn release_action(
        &mut self,
        pos: Pos2,
        button: PointerButton,
        doc: &mut dyn LayerTree,
        host: &mut TimelineHost<'_>,
    ) {
        let screen_pos = self.layout.origin() + pos.to_vec2();
        let secondary = button == PointerButton::Secondary;

        match self.hot.part {
            HitPart::HeaderGear => {
                let bounds = self.tester(None).part_bounds(&Hit::new(HitPart::HeaderGear));
                if let Some(rect) = bounds {
                    host.menus
                        .toggle_configure_popup(rect.translate(self.layout.origin().to_vec2()));
                }
            }
            HitPart::HeaderFrame if secondary && self.clk.frame == self.hot.frame => {
                self.show_popup(PopupKind::Frame, screen_pos, &Params::new(), host);
            }
            HitPart::RowText if secondary && self.clk.layer == self.hot.layer => {
                self.show_popup(PopupKind::Layer, screen_pos, &Params::new(), host);
            }
            HitPart::Cel if secondary => {
                let moved = self.state == TimelineState::MovingRange
                    && self.range.range().kind() == RangeType::Cels
                    && (self.hot.layer != self.clk.layer || self.hot.frame != self.clk.frame);
                let kind = if moved {
                    PopupKind::CelMovement
                } else {
                    PopupKind::Cel
                };
                self.show_popup(kind, screen_pos, &Params::new(), host);
            }
            HitPart::Tag => {
                let Some(tag) = self.clk.tag.filter(|id| self.tags.iter().any(|t| t.id == *id)) else {
                    return;
                };
                let params = params([("id", tag.to_string())]);
                // The command may delete the tag
                self.clk = Hit::default();
                self.hot = Hit::default();
                match button {
                    PointerButton::Primary => execute(host, CommandId::FrameTagProperties, &params),
                    PointerButton::Secondary => {
                        self.show_popup(PopupKind::Tag, screen_pos, &params, host)
                    }
                    _ => {}
                }
            }
            HitPart::TagSwitchBandButton => {
                if let Some(band) = self.clk.band {
                    self.focus_band(band, doc);
                }
            }
            _ => {}
        }
    }

    fn show_popup(
        &mut self,
        kind: PopupKind,
        screen_pos: Pos2,
        params: &Params,
        host: &mut TimelineHost<'_>,
    ) {
        if host.menus.show_popup(kind, screen_pos, params) {
            // Showing a menu ends the gesture without dropping
            self.state = TimelineState::Standby;
            self.invalidation.all();
        } else {
            debug!(?kind, "no popup registered");
        }
    }

    fn focus_band(&mut self, band: usize, doc: &mut dyn LayerTree) {
        self.layout.toggle_focused_band(band);
        self.regenerate_rows(doc);
        self.invalidation.relayout();
        debug!(band, focused = ?self.layout.focused_band(), "toggled focused tag band");
    }

    fn commit_drop(&mut self, op: DropOp, doc: &mut dyn LayerTree, host: &mut TimelineHost<'_>) {
        let Some(request) = self.drag.commit(self.range.range(), op) else {
            return;
        };
        debug!(?request, "dropping range");
        let result = host.commands.drop_range(&request);
        self.regenerate_rows(doc);
        match result {
            Ok(Some(range)) => self.range.set(range),
            Ok(None) => {}
            Err(source) => {
                let err = TimelineError::Drop(source);
                warn!(%err, "range drop failed");
            }
        }
        self.invalidation.all();
    }

    /// Back to standby, releasing capture and the drop preview.
    fn end_gesture(&mut self) {
        let clk = std::mem::take(&mut self.clk);
        self.invalidate_hit(&clk);
        let dropped = self.drag.reset();
        self.invalidate_range_bounds(&dropped);
        self.state = TimelineState::Standby;
        self.captured = false;
        self.range_before_gesture = None;
    }

    // ===== Other pointer events =====

    fn on_double_click(&mut self, pos: Pos2, doc: &mut dyn LayerTree, host: &mut TimelineHost<'_>) -> bool {
        let onionskin = self.onionskin_span(&*host.prefs);
        let hit = self.tester(onionskin).hit_test(pos);
        self.set_hot(hit);

        match hit.part {
            HitPart::RowText => {
                execute(host, CommandId::LayerProperties, &Params::new());
                true
            }
            HitPart::HeaderFrame => {
                let params = params([("frame", "current".to_string())]);
                execute(host, CommandId::FrameProperties, &params);
                true
            }
            HitPart::Cel => {
                execute(host, CommandId::CelProperties, &Params::new());
                true
            }
            HitPart::TagBand => match hit.band {
                Some(band) => {
                    self.focus_band(band, doc);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn on_pointer_leave(&mut self) -> bool {
        if !self.captured {
            self.pointer = None;
        }
        let hot = std::mem::take(&mut self.hot);
        self.invalidate_hit(&hot);
        false
    }

    fn on_capture_lost(&mut self) -> bool {
        if self.captured {
            debug!(state = ?self.state, "timeline capture lost");
            self.end_gesture();
        }
        false
    }

    // ===== Keyboard =====

    fn on_key(&mut self, key: Key, pressed: bool, host: &mut TimelineHost<'_>) -> bool {
        let used = match key {
            Key::Escape if pressed => {
                self.abort_gesture();
                false
            }
            Key::Space if pressed => {
                if self.pointer_inside() {
                    self.space_held = true;
                    true
                } else {
                    false
                }
            }
            Key::Space => {
                let was_held = self.space_held;
                self.space_held = false;
                was_held
            }
            _ => false,
        };
        self.refresh_hot(host);
        used
    }

    /// Esc: drops the selection in standby, otherwise cancels the gesture
    /// and restores the selection it started from.
    fn abort_gesture(&mut self) {
        if self.state.is_standby() {
            self.clear_and_invalidate_range();
            return;
        }
        debug!(state = ?self.state, "timeline gesture aborted");
        if let Some(before) = self.range_before_gesture {
            self.invalidate_range();
            self.range.set(before);
            self.invalidate_range();
        }
        self.end_gesture();
    }

    fn pointer_inside(&self) -> bool {
        let size = self.layout.size();
        self.pointer
            .is_some_and(|p| p.x >= 0.0 && p.y >= 0.0 && p.x < size.x && p.y < size.y)
    }

    /// Re-resolves the hot part at the last pointer position.
    fn refresh_hot(&mut self, host: &TimelineHost<'_>) {
        let Some(pos) = self.pointer else {
            return;
        };
        let onionskin = self.onionskin_span(&*host.prefs);
        let hit = self.tester(onionskin).hit_test(pos);
        self.set_hot(hit);
    }

    // ===== Wheel and timer =====

    fn on_wheel(&mut self, delta: Vec2, precise: bool, modifiers: Modifiers) -> bool {
        if modifiers.command || modifiers.ctrl {
            let dz = wheel_zoom_delta(delta, precise);
            self.set_zoom_and_update(self.viewport.zoom() - dz, true);
        } else {
            let geometry = self.geometry();
            let d = wheel_scroll_delta(delta, precise, modifiers, geometry.frame_width, geometry.row_height);
            self.scroll_by(d);
        }
        true
    }

    fn on_tick(&mut self, doc: Option<&dyn LayerTree>, host: &TimelineHost<'_>) -> bool {
        let tick = self
            .ants
            .tick(self.visible, doc.map(|d| d.id()), host.clipboard.clipboard_range());
        match tick {
            AntsTick::Advanced(range) => {
                let only_ants = self.invalidation.is_empty();
                self.invalidate_range_bounds(&range);
                if only_ants {
                    self.invalidation.mark_marching_ants_only();
                }
            }
            AntsTick::Stopped => {
                debug!("marching ants stopped");
                self.invalidation.all();
            }
            AntsTick::Idle => {}
        }
        false
    }
}

/// Ctrl or shift keep the current range and extend it.
fn is_additive(modifiers: Modifiers) -> bool {
    modifiers.ctrl || modifiers.shift
}

/// A primary press with the Cmd key selects the pixel boundaries of a layer.
fn selects_layer_boundaries(button: PointerButton, modifiers: Modifiers) -> bool {
    button == PointerButton::Primary && modifiers.mac_cmd
}

fn execute(host: &mut TimelineHost<'_>, id: CommandId, params: &Params) {
    debug!(%id, ?params, "executing timeline command");
    if let Err(source) = host.commands.execute(id, params) {
        let err = TimelineError::Command { id, source };
        warn!(%err, "timeline command failed");
    }
}
