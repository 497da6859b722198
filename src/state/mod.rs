//! State management modules for the timeline widget.
//!
//! This module contains state-only logic (no input dispatch):
//! - Hit descriptors (which part of the grid a pointer is over)
//! - Selection ranges and the range model
//! - Gesture state (the active state-machine state)
//! - Viewport state (scroll offset, zoom)
//! - Layout state and configuration
//! - Redraw requests

mod hit;
mod range;
mod interaction;
mod viewport;
mod layout_state;
mod invalidation;

pub use hit::{Hit, HitPart};
pub use range::{Bounds, Range, RangeModel, RangeType};
pub use interaction::{OnionskinSide, TimelineState};
pub use viewport::ViewportState;
pub use layout_state::{LayoutState, TimelineConfig};
pub use invalidation::Invalidation;
