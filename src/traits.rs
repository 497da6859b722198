//! Interfaces to the collaborators the timeline talks to.
//!
//! The timeline owns no document data. Layers, frames and tags live in the
//! host's document and are referenced by stable ids; commands, popup menus,
//! preferences and the clipboard are reached through the traits below.

use std::collections::BTreeMap;

use crate::domain::drag::DropRequest;
use crate::state::Range;

/// Stable identifier of a layer in the host document.
pub type LayerId = u64;

/// Stable identifier of an animation tag.
pub type TagId = u64;

/// Identifier of an open document.
pub type DocumentId = u64;

/// String key/value parameters handed to commands and popup menus.
pub type Params = BTreeMap<String, String>;

/// Builds a [`Params`] map from literal pairs.
pub fn params<const N: usize>(pairs: [(&str, String); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Kind of layer a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Image,
    Group,
}

/// Per-layer flags the timeline reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerFlag {
    Visible,
    /// Unlocked. A locked layer is one that is not editable.
    Editable,
    Continuous,
    Collapsed,
}

/// Animation tag spanning `from_frame..=to_frame`, drawn in tag band `band`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub id: TagId,
    pub from_frame: i32,
    pub to_frame: i32,
    pub band: usize,
}

/// Read/write access to the host document's layer tree.
///
/// Layer flags are written directly; the tree is responsible for its own
/// propagation into group contents.
pub trait LayerTree {
    /// Identifier of this document (compared against the clipboard owner).
    fn id(&self) -> DocumentId;

    /// Whether a sprite is attached. Header toggles require one.
    fn has_sprite(&self) -> bool {
        true
    }

    /// Layers directly under the root, bottom to top.
    fn top_level_layers(&self) -> Vec<LayerId>;

    /// Flattened row list in display order (first entry is the top row).
    ///
    /// Children of collapsed groups are not listed.
    fn rows(&self) -> Vec<LayerId>;

    /// Number of frames in the sprite.
    fn frame_count(&self) -> i32;

    fn layer_kind(&self, layer: LayerId) -> Option<LayerKind>;

    /// Returns `false` for unknown layers.
    fn flag(&self, layer: LayerId, flag: LayerFlag) -> bool;

    fn set_flag(&mut self, layer: LayerId, flag: LayerFlag, value: bool);

    fn tags(&self) -> Vec<TagInfo>;

    /// Called when the timeline moves the active layer or frame.
    fn set_active_site(&mut self, layer: Option<LayerId>, frame: i32);

    /// Asks every view of the document to redraw.
    fn notify_general_update(&mut self) {}
}

/// Commands the timeline can ask the host to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    LayerProperties,
    FrameProperties,
    CelProperties,
    FrameTagProperties,
    SelectLayerBoundaries,
}

impl CommandId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandId::LayerProperties => "LayerProperties",
            CommandId::FrameProperties => "FrameProperties",
            CommandId::CelProperties => "CelProperties",
            CommandId::FrameTagProperties => "FrameTagProperties",
            CommandId::SelectLayerBoundaries => "SelectLayerBoundaries",
        }
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host's command layer. All document mutations beyond flag toggles go
/// through here.
pub trait CommandExecutor {
    fn execute(&mut self, id: CommandId, params: &Params) -> anyhow::Result<()>;

    /// Moves or copies `request.source` onto `request.destination`.
    ///
    /// Returns the range the moved/copied content now occupies, if the
    /// selection should follow it.
    fn drop_range(&mut self, request: &DropRequest) -> anyhow::Result<Option<Range>>;
}

/// Context menus the timeline can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Frame,
    Layer,
    Cel,
    CelMovement,
    Tag,
}

pub trait PopupMenus {
    /// Shows the menu for `kind` at a screen position.
    ///
    /// Returns `false` when the host has no menu registered for `kind`.
    fn show_popup(&mut self, kind: PopupKind, screen_pos: egui::Pos2, params: &Params) -> bool;

    /// Opens the timeline configuration popup below `anchor`, or closes it
    /// when it is already open.
    fn toggle_configure_popup(&mut self, anchor: egui::Rect);
}

/// Per-document onion-skin preferences.
pub trait PreferencesStore {
    fn onionskin_active(&self) -> bool;
    fn set_onionskin_active(&mut self, active: bool);
    fn onionskin_prev_frames(&self) -> i32;
    fn set_onionskin_prev_frames(&mut self, frames: i32);
    fn onionskin_next_frames(&self) -> i32;
    fn set_onionskin_next_frames(&mut self, frames: i32);
}

/// Where the clipboard's pending range came from.
pub trait ClipboardSource {
    fn clipboard_range(&self) -> Option<(DocumentId, Range)>;
}
