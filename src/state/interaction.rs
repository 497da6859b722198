//! Gesture state machine states.
//!
//! ```text
//! Standby -> Scrolling              (middle button, or space held)
//! Standby -> MovingSeparator        (press on the separator)
//! Standby -> Selecting{Frames,Layers,Cels}
//! Standby -> MovingRange            (press on the range outline)
//! Standby -> MovingOnionskinRange   (press on an onion-skin handle)
//! Standby -> row flag painting      (press on a row eye/padlock/continuous icon)
//!
//! Any -> Standby                    (release, Esc, capture lost)
//! ```

use egui::Pos2;

use crate::traits::LayerFlag;

/// Which onion-skin range handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnionskinSide {
    Left,
    Right,
}

/// The single active gesture of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimelineState {
    #[default]
    Standby,
    Scrolling {
        /// Pointer position of the previous scroll step
        last_pos: Pos2,
    },
    MovingSeparator,
    SelectingFrames,
    SelectingLayers,
    SelectingCels,
    MovingRange,
    MovingOnionskinRange {
        side: OnionskinSide,
        /// Frame count before the drag started
        original: i32,
    },
    ShowingLayers,
    HidingLayers,
    LockingLayers,
    UnlockingLayers,
    EnablingContinuousLayers,
    DisablingContinuousLayers,
    ExpandingLayers,
    CollapsingLayers,
}

impl TimelineState {
    pub fn is_standby(&self) -> bool {
        matches!(self, Self::Standby)
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self, Self::Scrolling { .. })
    }

    /// Flag and target value painted by a row-icon drag, if this is one.
    pub fn painted_flag(&self) -> Option<(LayerFlag, bool)> {
        match self {
            Self::ShowingLayers => Some((LayerFlag::Visible, true)),
            Self::HidingLayers => Some((LayerFlag::Visible, false)),
            Self::LockingLayers => Some((LayerFlag::Editable, false)),
            Self::UnlockingLayers => Some((LayerFlag::Editable, true)),
            Self::EnablingContinuousLayers => Some((LayerFlag::Continuous, true)),
            Self::DisablingContinuousLayers => Some((LayerFlag::Continuous, false)),
            Self::ExpandingLayers => Some((LayerFlag::Collapsed, false)),
            Self::CollapsingLayers => Some((LayerFlag::Collapsed, true)),
            _ => None,
        }
    }

    /// State that paints `flag` to `value` across rows.
    pub fn painting(flag: LayerFlag, value: bool) -> Self {
        match (flag, value) {
            (LayerFlag::Visible, true) => Self::ShowingLayers,
            (LayerFlag::Visible, false) => Self::HidingLayers,
            (LayerFlag::Editable, true) => Self::UnlockingLayers,
            (LayerFlag::Editable, false) => Self::LockingLayers,
            (LayerFlag::Continuous, true) => Self::EnablingContinuousLayers,
            (LayerFlag::Continuous, false) => Self::DisablingContinuousLayers,
            (LayerFlag::Collapsed, true) => Self::CollapsingLayers,
            (LayerFlag::Collapsed, false) => Self::ExpandingLayers,
        }
    }
}
