//! Input handling: the event vocabulary, the gesture state machine that
//! consumes it, and the translation from egui input.

pub mod egui_bridge;
mod events;
mod timeline_input_handler;

pub use events::TimelineEvent;
