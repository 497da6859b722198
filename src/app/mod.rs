//! Settings and preferences for the timeline.
//!
//! This module contains settings persistence and the default preferences
//! store implementation.

mod settings_coordinator;
mod onionskin_prefs;

pub use settings_coordinator::SettingsCoordinator;
pub use onionskin_prefs::{OnionskinPrefs, ONIONSKIN_KEY};

/// Storage key for [`crate::state::TimelineConfig`].
pub const TIMELINE_CONFIG_KEY: &str = "timeline_config";
