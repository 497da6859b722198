//! Input events the timeline reacts to, in widget coordinates.

use egui::{Key, Modifiers, PointerButton, Pos2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEvent {
    PointerDown {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Pos2,
        modifiers: Modifiers,
    },
    PointerUp {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    DoubleClick {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// The pointer left the widget
    PointerLeave,
    /// Pointer capture was taken away (focus loss, popup opened elsewhere)
    CaptureLost,
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    /// Positive deltas scroll towards higher frames and lower rows.
    /// `precise` deltas are in pixels, stepped ones in whole cells.
    Wheel {
        delta: Vec2,
        precise: bool,
        modifiers: Modifiers,
    },
    /// Pinch gesture; `magnification` is relative (0.1 = 10% larger)
    TouchMagnify { magnification: f32 },
    /// Marching-ants timer
    Tick,
}
