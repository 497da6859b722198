//! Hit descriptors produced by hit testing.

use crate::traits::TagId;

/// Structural part of the timeline under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPart {
    #[default]
    None,
    Separator,
    HeaderEye,
    HeaderPadlock,
    HeaderContinuous,
    HeaderGear,
    HeaderOnionskin,
    OnionskinRangeLeft,
    OnionskinRangeRight,
    HeaderFrame,
    RowText,
    RowEyeIcon,
    RowPadlockIcon,
    RowContinuousIcon,
    Cel,
    RangeOutline,
    Tag,
    TagBand,
    TagSwitchBandButton,
}

/// Result of resolving a pointer position.
///
/// `layer` and `frame` are row and frame indices computed from the position
/// and may lie outside the document (dragging past the last frame, for
/// example). Check them with the timeline's validity predicates before use.
/// The tag is held by id and must be looked up again before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hit {
    pub part: HitPart,
    pub layer: Option<i32>,
    pub frame: Option<i32>,
    pub tag: Option<TagId>,
    pub band: Option<usize>,
}

impl Hit {
    pub fn new(part: HitPart) -> Self {
        Self {
            part,
            ..Self::default()
        }
    }

    pub fn at(part: HitPart, layer: Option<i32>, frame: Option<i32>) -> Self {
        Self {
            part,
            layer,
            frame,
            ..Self::default()
        }
    }

    pub fn is_none(&self) -> bool {
        self.part == HitPart::None
    }
}
