use anyhow::{bail, Result};
use egui::{pos2, vec2, Key, Modifiers, PointerButton, Pos2, Rect};

use celtrack::{
    Bounds, ClipboardSource, CommandExecutor, CommandId, DocumentId, DropOp, DropPlace,
    DropRequest, HitPart, LayerFlag, LayerId, LayerKind, LayerTree, OnionskinPrefs, Params,
    PopupKind, PopupMenus, PreferencesStore, Range, RangeType, SiteLock, TagInfo, Timeline,
    TimelineConfig, TimelineEvent, TimelineHost, TimelineState,
};

// ===== Mock document and host services =====

struct Layer {
    id: LayerId,
    kind: LayerKind,
    parent: Option<LayerId>,
    visible: bool,
    editable: bool,
    continuous: bool,
    collapsed: bool,
}

/// Layer tree where siblings are stored bottom to top.
struct MockDoc {
    layers: Vec<Layer>,
    frames: i32,
    tags: Vec<TagInfo>,
    active: (Option<LayerId>, i32),
    lock: Option<SiteLock>,
    /// Whether the site lock was held during each active-site push
    site_pushes: Vec<bool>,
    updates: usize,
}

impl MockDoc {
    fn flat(count: u64, frames: i32) -> Self {
        let mut doc = MockDoc {
            layers: Vec::new(),
            frames,
            tags: Vec::new(),
            active: (None, 0),
            lock: None,
            site_pushes: Vec::new(),
            updates: 0,
        };
        for id in 1..=count {
            doc.add(id, LayerKind::Image, None);
        }
        doc
    }

    fn add(&mut self, id: LayerId, kind: LayerKind, parent: Option<LayerId>) {
        self.layers.push(Layer {
            id,
            kind,
            parent,
            visible: true,
            editable: true,
            continuous: false,
            collapsed: false,
        });
    }

    fn remove(&mut self, id: LayerId) {
        self.layers.retain(|l| l.id != id);
    }

    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn push_rows(&self, parent: Option<LayerId>, rows: &mut Vec<LayerId>) {
        for layer in self.layers.iter().rev().filter(|l| l.parent == parent) {
            rows.push(layer.id);
            if layer.kind == LayerKind::Group && !layer.collapsed {
                self.push_rows(Some(layer.id), rows);
            }
        }
    }

    fn visible_layers(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .map(|l| l.id)
            .collect()
    }
}

impl LayerTree for MockDoc {
    fn id(&self) -> DocumentId {
        42
    }

    fn top_level_layers(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|l| l.parent.is_none())
            .map(|l| l.id)
            .collect()
    }

    fn rows(&self) -> Vec<LayerId> {
        let mut rows = Vec::new();
        self.push_rows(None, &mut rows);
        rows
    }

    fn frame_count(&self) -> i32 {
        self.frames
    }

    fn layer_kind(&self, layer: LayerId) -> Option<LayerKind> {
        self.layer(layer).map(|l| l.kind)
    }

    fn flag(&self, layer: LayerId, flag: LayerFlag) -> bool {
        self.layer(layer).is_some_and(|l| match flag {
            LayerFlag::Visible => l.visible,
            LayerFlag::Editable => l.editable,
            LayerFlag::Continuous => l.continuous,
            LayerFlag::Collapsed => l.collapsed,
        })
    }

    fn set_flag(&mut self, layer: LayerId, flag: LayerFlag, value: bool) {
        if let Some(l) = self.layers.iter_mut().find(|l| l.id == layer) {
            match flag {
                LayerFlag::Visible => l.visible = value,
                LayerFlag::Editable => l.editable = value,
                LayerFlag::Continuous => l.continuous = value,
                LayerFlag::Collapsed => l.collapsed = value,
            }
        }
    }

    fn tags(&self) -> Vec<TagInfo> {
        self.tags.clone()
    }

    fn set_active_site(&mut self, layer: Option<LayerId>, frame: i32) {
        self.active = (layer, frame);
        let held = self.lock.as_ref().is_some_and(|lock| lock.is_held());
        self.site_pushes.push(held);
    }

    fn notify_general_update(&mut self) {
        self.updates += 1;
    }
}

#[derive(Default)]
struct MockCommands {
    executed: Vec<(CommandId, Params)>,
    drops: Vec<DropRequest>,
    fail: bool,
}

impl CommandExecutor for MockCommands {
    fn execute(&mut self, id: CommandId, params: &Params) -> Result<()> {
        self.executed.push((id, params.clone()));
        if self.fail {
            bail!("command rejected");
        }
        Ok(())
    }

    fn drop_range(&mut self, request: &DropRequest) -> Result<Option<Range>> {
        self.drops.push(*request);
        Ok(Some(request.destination))
    }
}

#[derive(Default)]
struct MockMenus {
    shown: Vec<(PopupKind, Pos2, Params)>,
    configure_toggles: Vec<Rect>,
}

impl PopupMenus for MockMenus {
    fn show_popup(&mut self, kind: PopupKind, screen_pos: Pos2, params: &Params) -> bool {
        self.shown.push((kind, screen_pos, params.clone()));
        true
    }

    fn toggle_configure_popup(&mut self, anchor: Rect) {
        self.configure_toggles.push(anchor);
    }
}

#[derive(Default)]
struct MockClipboard {
    range: Option<(DocumentId, Range)>,
}

impl ClipboardSource for MockClipboard {
    fn clipboard_range(&self) -> Option<(DocumentId, Range)> {
        self.range
    }
}

struct Fixture {
    timeline: Timeline,
    doc: MockDoc,
    commands: MockCommands,
    menus: MockMenus,
    prefs: OnionskinPrefs,
    clipboard: MockClipboard,
}

const ORIGIN: Pos2 = Pos2::new(50.0, 20.0);

impl Fixture {
    fn new(mut doc: MockDoc) -> Self {
        let mut timeline = Timeline::new(TimelineConfig::default());
        timeline.set_bounds(Rect::from_min_size(ORIGIN, vec2(400.0, 200.0)));
        timeline.attach(&doc);
        doc.lock = Some(timeline.site_lock());
        Fixture {
            timeline,
            doc,
            commands: MockCommands::default(),
            menus: MockMenus::default(),
            prefs: OnionskinPrefs::default(),
            clipboard: MockClipboard::default(),
        }
    }

    fn send(&mut self, event: TimelineEvent) -> bool {
        let mut host = TimelineHost {
            commands: &mut self.commands,
            menus: &mut self.menus,
            prefs: &mut self.prefs,
            clipboard: &self.clipboard,
        };
        let doc: &mut dyn LayerTree = &mut self.doc;
        self.timeline.process_event(&event, Some(doc), &mut host)
    }

    fn down(&mut self, pos: Pos2, button: PointerButton, modifiers: Modifiers) -> bool {
        self.send(TimelineEvent::PointerDown { pos, button, modifiers })
    }

    fn move_to(&mut self, pos: Pos2) -> bool {
        self.send(TimelineEvent::PointerMove {
            pos,
            modifiers: Modifiers::NONE,
        })
    }

    fn up(&mut self, pos: Pos2, button: PointerButton, modifiers: Modifiers) -> bool {
        self.send(TimelineEvent::PointerUp { pos, button, modifiers })
    }

    fn click_with(&mut self, pos: Pos2, modifiers: Modifiers) {
        self.down(pos, PointerButton::Primary, modifiers);
        self.up(pos, PointerButton::Primary, modifiers);
    }

    fn click(&mut self, pos: Pos2) {
        self.click_with(pos, Modifiers::NONE);
    }

    fn right_click(&mut self, pos: Pos2) {
        self.down(pos, PointerButton::Secondary, Modifiers::NONE);
        self.up(pos, PointerButton::Secondary, Modifiers::NONE);
    }

    fn key_down(&mut self, key: Key) -> bool {
        self.send(TimelineEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        })
    }
}

// Default layout without tags: header row at y 0..12, rows below it,
// frame columns starting at x = 104, 12px cells.
const TAGS: f32 = 12.0;

fn header_frame(frame: i32) -> Pos2 {
    pos2(110.0 + 12.0 * frame as f32, 6.0)
}

fn cel(layer: i32, frame: i32) -> Pos2 {
    pos2(110.0 + 12.0 * frame as f32, 18.0 + 12.0 * layer as f32)
}

fn row_eye(layer: i32) -> Pos2 {
    pos2(6.0, 18.0 + 12.0 * layer as f32)
}

fn row_padlock(layer: i32) -> Pos2 {
    pos2(18.0, 18.0 + 12.0 * layer as f32)
}

fn row_continuous(layer: i32) -> Pos2 {
    pos2(30.0, 18.0 + 12.0 * layer as f32)
}

fn row_text(layer: i32) -> Pos2 {
    pos2(70.0, 18.0 + 12.0 * layer as f32)
}

// ===== Selection =====

#[test]
fn test_shift_click_extends_frame_range() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(header_frame(3));
    assert_eq!(f.timeline.range(), Range::single(RangeType::Frames, 0, 3));

    f.click_with(header_frame(7), Modifiers::SHIFT);
    let range = f.timeline.range();
    assert_eq!(range.kind(), RangeType::Frames);
    assert_eq!(range.frame_bounds(), Bounds::new(3, 7));
    assert_eq!(f.doc.active.1, 7);
    assert_eq!(f.timeline.state(), TimelineState::Standby);
}

#[test]
fn test_click_without_modifier_replaces_range() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(header_frame(3));
    f.click(header_frame(9));
    assert_eq!(f.timeline.range().frame_bounds(), Bounds::single(9));
}

#[test]
fn test_cel_click_selects_single_cel() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));
    let rows = f.timeline.rows().to_vec();

    assert!(f.down(cel(1, 4), PointerButton::Primary, Modifiers::NONE));
    assert_eq!(f.timeline.state(), TimelineState::SelectingCels);
    assert!(f.timeline.has_capture());
    f.up(cel(1, 4), PointerButton::Primary, Modifiers::NONE);

    assert_eq!(f.timeline.range(), Range::single(RangeType::Cels, 1, 4));
    assert_eq!(f.doc.active, (Some(rows[1]), 4));
    assert!(!f.timeline.has_capture());
}

#[test]
fn test_drag_across_cels_extends_selection() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.down(cel(0, 1), PointerButton::Primary, Modifiers::NONE);
    f.move_to(cel(2, 5));
    f.up(cel(2, 5), PointerButton::Primary, Modifiers::NONE);

    let range = f.timeline.range();
    assert_eq!(range.kind(), RangeType::Cels);
    assert_eq!(range.layer_bounds(), Bounds::new(0, 2));
    assert_eq!(range.frame_bounds(), Bounds::new(1, 5));
}

#[test]
fn test_drag_over_row_labels_selects_layers() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.down(row_text(0), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::SelectingLayers);
    f.move_to(row_text(2));
    f.up(row_text(2), PointerButton::Primary, Modifiers::NONE);

    let range = f.timeline.range();
    assert_eq!(range.kind(), RangeType::Layers);
    assert_eq!(range.layer_bounds(), Bounds::new(0, 2));
}

#[test]
fn test_right_click_keeps_selection_of_active_frame() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(header_frame(2));
    f.click_with(header_frame(5), Modifiers::SHIFT);
    f.right_click(header_frame(4));

    assert_eq!(f.timeline.range().frame_bounds(), Bounds::new(2, 5));
    assert_eq!(f.menus.shown.len(), 1);
    assert_eq!(f.menus.shown[0].0, PopupKind::Frame);
    assert_eq!(f.menus.shown[0].1, ORIGIN + header_frame(4).to_vec2());
}

#[test]
fn test_cmd_click_selects_layer_boundaries() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));
    let rows = f.timeline.rows().to_vec();

    f.click_with(cel(2, 3), Modifiers::MAC_CMD | Modifiers::COMMAND | Modifiers::SHIFT);

    assert_eq!(f.timeline.range().kind(), RangeType::None);
    let (id, params) = &f.commands.executed[0];
    assert_eq!(*id, CommandId::SelectLayerBoundaries);
    assert_eq!(params["layer"], rows[2].to_string());
    assert_eq!(params["frame"], "3");
    assert_eq!(params["op"], "add");
}

#[test]
fn test_ctrl_click_extends_cels_range() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 1));
    f.click_with(cel(2, 3), Modifiers::CTRL | Modifiers::COMMAND);

    assert!(f.commands.executed.is_empty());
    let range = f.timeline.range();
    assert_eq!(range.kind(), RangeType::Cels);
    assert_eq!(range.layer_bounds(), Bounds::new(1, 2));
    assert_eq!(range.frame_bounds(), Bounds::new(1, 3));
}

#[test]
fn test_ctrl_click_extends_layers_range() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(row_text(0));
    f.click_with(row_text(2), Modifiers::CTRL | Modifiers::COMMAND);

    assert!(f.commands.executed.is_empty());
    let range = f.timeline.range();
    assert_eq!(range.kind(), RangeType::Layers);
    assert_eq!(range.layer_bounds(), Bounds::new(0, 2));
}

// ===== Escape and capture =====

#[test]
fn test_escape_restores_range_before_gesture() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(0, 0));
    f.down(cel(2, 3), PointerButton::Primary, Modifiers::NONE);
    f.move_to(cel(3, 6));
    assert_eq!(f.timeline.range().frame_bounds(), Bounds::new(3, 6));

    assert!(!f.key_down(Key::Escape));
    assert_eq!(f.timeline.state(), TimelineState::Standby);
    assert_eq!(f.timeline.range(), Range::single(RangeType::Cels, 0, 0));
    assert!(!f.up(cel(3, 6), PointerButton::Primary, Modifiers::NONE));
}

#[test]
fn test_escape_while_moving_range_discards_preview() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 2));
    f.down(pos2(129.0, 30.0), PointerButton::Primary, Modifiers::NONE);
    f.move_to(cel(1, 5));
    assert!(f.timeline.drop_range().enabled());

    f.key_down(Key::Escape);
    assert_eq!(f.timeline.state(), TimelineState::Standby);
    assert!(!f.timeline.drop_range().enabled());
    assert_eq!(f.timeline.range(), Range::single(RangeType::Cels, 1, 2));

    assert!(!f.up(cel(1, 5), PointerButton::Primary, Modifiers::NONE));
    assert!(f.commands.drops.is_empty());
}

#[test]
fn test_escape_while_painting_stops_the_paint() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));
    let rows = f.timeline.rows().to_vec();

    f.down(row_eye(0), PointerButton::Primary, Modifiers::NONE);
    f.move_to(row_eye(1));
    f.key_down(Key::Escape);
    assert_eq!(f.timeline.state(), TimelineState::Standby);

    // Rows painted before the abort keep their new flag
    f.move_to(row_eye(2));
    f.up(row_eye(2), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.doc.visible_layers(), vec![rows[3], rows[2]]);
}

#[test]
fn test_escape_in_standby_clears_range() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 1));
    f.key_down(Key::Escape);
    assert!(!f.timeline.range().enabled());
}

#[test]
fn test_capture_lost_ends_gesture_without_drop() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 2));
    f.down(pos2(129.0, 30.0), PointerButton::Primary, Modifiers::NONE);
    f.move_to(cel(1, 5));
    f.send(TimelineEvent::CaptureLost);

    assert_eq!(f.timeline.state(), TimelineState::Standby);
    assert!(!f.timeline.drop_range().enabled());
    assert!(f.commands.drops.is_empty());
}

// ===== Range drag and drop =====

#[test]
fn test_drag_cels_range_commits_move() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 2));
    // Left edge of the selected cel is on its outline
    f.down(pos2(129.0, 30.0), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::MovingRange);
    f.move_to(cel(1, 5));
    assert_eq!(f.timeline.drop_range(), Range::single(RangeType::Cels, 1, 5));
    f.up(cel(1, 5), PointerButton::Primary, Modifiers::NONE);

    assert_eq!(
        f.commands.drops,
        vec![DropRequest {
            op: DropOp::Move,
            source: Range::single(RangeType::Cels, 1, 2),
            destination: Range::single(RangeType::Cels, 1, 5),
            place: DropPlace::After,
        }]
    );
    assert_eq!(f.timeline.range(), Range::single(RangeType::Cels, 1, 5));
    assert!(!f.timeline.drop_range().enabled());
}

#[test]
fn test_drag_with_copy_modifier_commits_copy() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 2));
    f.down(pos2(129.0, 30.0), PointerButton::Primary, Modifiers::NONE);
    f.move_to(cel(2, 4));
    f.up(cel(2, 4), PointerButton::Primary, Modifiers::ALT);

    assert_eq!(f.commands.drops.len(), 1);
    assert_eq!(f.commands.drops[0].op, DropOp::Copy);
}

#[test]
fn test_frame_drag_past_last_frame_pins_one_past_end() {
    let mut f = Fixture::new(MockDoc::flat(4, 10));

    f.click(header_frame(3));
    f.down(pos2(141.0, 30.0), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::MovingRange);

    f.move_to(cel(1, 20));
    let drop = f.timeline.drop_range();
    assert_eq!(drop.kind(), RangeType::Frames);
    assert_eq!(drop.frame_bounds(), Bounds::single(10));

    f.move_to(pos2(-40.0, 30.0));
    assert_eq!(f.timeline.drop_range().frame_bounds(), Bounds::single(-1));
}

#[test]
fn test_right_release_after_moving_cels_shows_movement_popup() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));

    f.click(cel(1, 2));
    f.down(pos2(129.0, 30.0), PointerButton::Secondary, Modifiers::NONE);
    f.move_to(cel(1, 6));
    f.up(cel(1, 6), PointerButton::Secondary, Modifiers::NONE);

    assert_eq!(f.menus.shown[0].0, PopupKind::CelMovement);
    // The popup ends the gesture before anything is dropped
    assert!(f.commands.drops.is_empty());
}

// ===== Layer flags =====

#[test]
fn test_alt_click_eye_solos_layer_and_restores() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));
    let rows = f.timeline.rows().to_vec();

    f.down(row_eye(2), PointerButton::Primary, Modifiers::ALT);
    assert_eq!(f.timeline.state(), TimelineState::ShowingLayers);
    f.up(row_eye(2), PointerButton::Primary, Modifiers::ALT);
    assert_eq!(f.doc.visible_layers(), vec![rows[2]]);
    assert!(f.doc.updates > 0);

    f.click_with(row_eye(2), Modifiers::ALT);
    assert_eq!(f.doc.visible_layers().len(), 4);
}

#[test]
fn test_eye_drag_paints_visibility() {
    let mut f = Fixture::new(MockDoc::flat(4, 20));
    let rows = f.timeline.rows().to_vec();

    f.down(row_eye(0), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::HidingLayers);
    f.move_to(row_eye(1));
    f.move_to(row_eye(2));
    f.up(row_eye(2), PointerButton::Primary, Modifiers::NONE);

    assert_eq!(f.doc.visible_layers(), vec![rows[3]]);
}

#[test]
fn test_padlock_press_locks_layer() {
    let mut f = Fixture::new(MockDoc::flat(2, 5));
    let rows = f.timeline.rows().to_vec();

    f.down(row_padlock(1), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::LockingLayers);
    assert!(!f.doc.flag(rows[1], LayerFlag::Editable));
}

#[test]
fn test_header_eye_toggles_all_top_level_layers() {
    let mut f = Fixture::new(MockDoc::flat(3, 5));

    f.click(pos2(6.0, 6.0));
    assert!(f.doc.visible_layers().is_empty());
    f.click(pos2(6.0, 6.0));
    assert_eq!(f.doc.visible_layers().len(), 3);
}

#[test]
fn test_collapse_group_regenerates_rows_and_rehits() {
    let mut doc = MockDoc::flat(1, 5);
    doc.add(2, LayerKind::Group, None);
    doc.add(3, LayerKind::Image, Some(2));
    doc.add(4, LayerKind::Image, Some(2));
    let mut f = Fixture::new(doc);
    assert_eq!(f.timeline.rows(), &[2, 4, 3, 1]);

    f.down(row_continuous(0), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::CollapsingLayers);
    assert_eq!(f.timeline.rows(), &[2, 1]);
    assert_eq!(f.timeline.clicked().part, HitPart::RowContinuousIcon);
    assert_eq!(f.timeline.clicked().layer, Some(0));
    f.up(row_continuous(0), PointerButton::Primary, Modifiers::NONE);

    assert!(f.doc.flag(2, LayerFlag::Collapsed));
}

#[test]
fn test_continuous_icon_on_image_layer() {
    let mut f = Fixture::new(MockDoc::flat(2, 5));
    let rows = f.timeline.rows().to_vec();

    f.click(row_continuous(0));
    assert!(f.doc.flag(rows[0], LayerFlag::Continuous));
}

// ===== Onion skin =====

#[test]
fn test_onionskin_handle_drag_never_goes_negative() {
    let mut f = Fixture::new(MockDoc::flat(2, 20));
    f.prefs.active = true;
    f.click(header_frame(5));

    // Left edge of the onion-skin span [4, 6]
    f.down(pos2(152.0, 6.0), PointerButton::Primary, Modifiers::NONE);
    assert!(matches!(
        f.timeline.state(),
        TimelineState::MovingOnionskinRange { .. }
    ));
    f.move_to(pos2(212.0, 6.0));
    f.up(pos2(212.0, 6.0), PointerButton::Primary, Modifiers::NONE);

    assert_eq!(f.prefs.onionskin_prev_frames(), 0);
    assert_eq!(f.prefs.onionskin_next_frames(), 1);
}

#[test]
fn test_onionskin_header_icon_toggles_preference() {
    let mut f = Fixture::new(MockDoc::flat(2, 20));

    f.click(pos2(54.0, 6.0));
    assert!(f.prefs.onionskin_active());
}

// ===== Release and double-click actions =====

#[test]
fn test_tag_click_runs_properties_and_forgets_hit() {
    let mut doc = MockDoc::flat(2, 20);
    doc.tags.push(TagInfo {
        id: 7,
        from_frame: 2,
        to_frame: 4,
        band: 0,
    });
    let mut f = Fixture::new(doc);
    let tag = pos2(146.0, 6.0);

    f.click(tag);

    let (id, params) = &f.commands.executed[0];
    assert_eq!(*id, CommandId::FrameTagProperties);
    assert_eq!(params["id"], "7");
    assert!(f.timeline.clicked().is_none());
    assert!(f.timeline.hot().is_none());

    f.right_click(tag);
    assert_eq!(f.menus.shown[0].0, PopupKind::Tag);
    assert_eq!(f.menus.shown[0].2["id"], "7");
}

#[test]
fn test_switch_band_button_focuses_band() {
    let mut doc = MockDoc::flat(2, 20);
    for (id, band) in [(1, 0), (2, 1)] {
        doc.tags.push(TagInfo {
            id,
            from_frame: 0,
            to_frame: 3,
            band,
        });
    }
    let mut f = Fixture::new(doc);

    // Second strip, last icon box before the separator
    f.click(pos2(94.0, 18.0));
    assert_eq!(f.timeline.focused_band(), Some(1));
    f.click(pos2(94.0, 6.0));
    assert_eq!(f.timeline.focused_band(), None);
}

#[test]
fn test_double_click_commands() {
    let mut f = Fixture::new(MockDoc::flat(3, 20));
    let double = |f: &mut Fixture, pos| {
        f.send(TimelineEvent::DoubleClick {
            pos,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        })
    };

    assert!(double(&mut f, row_text(1)));
    assert!(double(&mut f, header_frame(2)));
    assert!(double(&mut f, cel(0, 0)));
    assert!(!double(&mut f, pos2(6.0, 6.0)));

    let ids: Vec<_> = f.commands.executed.iter().map(|(id, _)| *id).collect();
    assert_eq!(
        ids,
        vec![
            CommandId::LayerProperties,
            CommandId::FrameProperties,
            CommandId::CelProperties
        ]
    );
    assert_eq!(f.commands.executed[1].1["frame"], "current");
}

#[test]
fn test_gear_release_toggles_configure_popup() {
    let mut f = Fixture::new(MockDoc::flat(1, 5));

    f.click(pos2(42.0, 6.0));
    assert_eq!(f.menus.configure_toggles.len(), 1);
    assert_eq!(f.menus.configure_toggles[0].min, ORIGIN + vec2(36.0, 0.0));
}

#[test]
fn test_failed_command_is_not_fatal() {
    let mut f = Fixture::new(MockDoc::flat(1, 5));
    f.commands.fail = true;

    let consumed = f.send(TimelineEvent::DoubleClick {
        pos: row_text(0),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    });
    assert!(consumed);
    assert_eq!(f.commands.executed.len(), 1);
}

// ===== Viewport =====

#[test]
fn test_separator_drag_moves_separator() {
    let mut f = Fixture::new(MockDoc::flat(2, 5));

    f.down(pos2(101.0, 50.0), PointerButton::Primary, Modifiers::NONE);
    assert_eq!(f.timeline.state(), TimelineState::MovingSeparator);
    f.move_to(pos2(150.0, 50.0));
    assert_eq!(f.timeline.separator_x(), 150.0);
    f.move_to(pos2(-20.0, 50.0));
    assert_eq!(f.timeline.separator_x(), 0.0);
}

#[test]
fn test_wheel_scrolls_and_zooms() {
    let mut f = Fixture::new(MockDoc::flat(2, 100));

    f.send(TimelineEvent::Wheel {
        delta: vec2(0.0, 1.0),
        precise: false,
        modifiers: Modifiers::SHIFT,
    });
    assert_eq!(f.timeline.scroll().x, 12.0);

    f.send(TimelineEvent::Wheel {
        delta: vec2(0.0, -1.0),
        precise: false,
        modifiers: Modifiers::CTRL,
    });
    assert_eq!(f.timeline.zoom(), 2.0);

    f.send(TimelineEvent::TouchMagnify { magnification: 10.0 });
    assert_eq!(f.timeline.zoom(), 10.0);
}

#[test]
fn test_space_turns_press_into_scrolling() {
    let mut f = Fixture::new(MockDoc::flat(2, 100));

    f.move_to(cel(0, 10));
    assert!(f.key_down(Key::Space));
    f.down(cel(0, 10), PointerButton::Primary, Modifiers::NONE);
    assert!(f.timeline.state().is_scrolling());
    f.move_to(cel(0, 5));
    assert_eq!(f.timeline.scroll().x, 60.0);
    f.up(cel(0, 5), PointerButton::Primary, Modifiers::NONE);

    assert!(f.send(TimelineEvent::KeyUp {
        key: Key::Space,
        modifiers: Modifiers::NONE,
    }));
    assert_eq!(f.timeline.state(), TimelineState::Standby);
    assert!(!f.timeline.range().enabled());
}

#[test]
fn test_pointer_leave_clears_hot() {
    let mut f = Fixture::new(MockDoc::flat(2, 5));

    f.move_to(cel(0, 1));
    assert_eq!(f.timeline.hot().part, HitPart::Cel);
    f.timeline.take_invalidation();
    f.send(TimelineEvent::PointerLeave);
    assert!(f.timeline.hot().is_none());
    assert!(!f.timeline.take_invalidation().is_empty());
}

// ===== Document changes =====

#[test]
fn test_range_follows_rows_after_regeneration() {
    let mut f = Fixture::new(MockDoc::flat(4, 5));
    assert_eq!(f.timeline.rows(), &[4, 3, 2, 1]);

    f.click(row_text(1));
    f.doc.remove(4);
    f.timeline.regenerate_rows(&f.doc);
    assert_eq!(f.timeline.range().layer_bounds(), Bounds::single(0));

    f.doc.remove(3);
    f.timeline.regenerate_rows(&f.doc);
    assert!(!f.timeline.range().enabled());
}

#[test]
fn test_site_changes_from_timeline_hold_lock() {
    let mut f = Fixture::new(MockDoc::flat(3, 5));

    f.click(cel(1, 3));
    assert!(!f.doc.site_pushes.is_empty());
    assert!(f.doc.site_pushes.iter().all(|&held| held));
    assert!(!f.timeline.site_lock().is_held());
    assert!(f.timeline.range().enabled());

    f.timeline.on_active_site_change(Some(1), 0);
    assert!(!f.timeline.range().enabled());
    assert_eq!(f.timeline.active_frame(), 0);
}

#[test]
fn test_without_document_only_ticks_are_handled() {
    let mut timeline = Timeline::new(TimelineConfig::default());
    let mut commands = MockCommands::default();
    let mut menus = MockMenus::default();
    let mut prefs = OnionskinPrefs::default();
    let clipboard = MockClipboard::default();
    let mut host = TimelineHost {
        commands: &mut commands,
        menus: &mut menus,
        prefs: &mut prefs,
        clipboard: &clipboard,
    };

    let event = TimelineEvent::PointerDown {
        pos: pos2(10.0, 10.0),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    };
    assert!(!timeline.process_event(&event, None, &mut host));
    assert!(!timeline.process_event(&TimelineEvent::Tick, None, &mut host));
}

#[test]
fn test_marching_ants_follow_clipboard() {
    let mut f = Fixture::new(MockDoc::flat(2, 5));
    let copied = Range::single(RangeType::Cels, 0, 1);
    f.clipboard.range = Some((42, copied));
    f.send(TimelineEvent::Tick);
    assert_eq!(f.timeline.marching_ants_phase(), 0);

    f.timeline.activate_clipboard_range();
    f.timeline.take_invalidation();

    f.send(TimelineEvent::Tick);
    assert_eq!(f.timeline.marching_ants_phase(), 1);
    assert!(f.timeline.take_invalidation().marching_ants_only());

    f.clipboard.range = None;
    f.send(TimelineEvent::Tick);
    assert!(!f.timeline.marching_ants().is_running());
    assert_eq!(f.timeline.marching_ants_phase(), 1);
}

#[test]
fn test_tag_band_offsets_grid() {
    let mut doc = MockDoc::flat(2, 20);
    doc.tags.push(TagInfo {
        id: 1,
        from_frame: 0,
        to_frame: 1,
        band: 0,
    });
    let mut f = Fixture::new(doc);

    f.click(header_frame(3) + vec2(0.0, TAGS));
    assert_eq!(f.timeline.range().kind(), RangeType::Frames);
}
