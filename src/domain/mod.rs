//! Interaction logic for the timeline grid.
//!
//! This module contains the pieces the event dispatcher drives:
//! - Viewport operations (grid geometry, wheel zoom/scroll math)
//! - Hit testing (pointer position to timeline part)
//! - Toggle cascade (bulk, painted and solo layer flag toggles)
//! - Drag controller (drop preview and commit of range drags)
//! - Marching ants (clipboard outline animation phase)

pub mod viewport_operations;
pub mod toggle_cascade;
pub mod drag;
pub mod marching_ants;
