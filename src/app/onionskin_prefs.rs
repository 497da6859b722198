//! Onion-skin preferences of a document.

use serde::{Deserialize, Serialize};

use super::SettingsCoordinator;
use crate::traits::PreferencesStore;

/// Storage key for onion-skin preferences.
pub const ONIONSKIN_KEY: &str = "onionskin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnionskinPrefs {
    pub active: bool,
    pub prev_frames: i32,
    pub next_frames: i32,
}

impl Default for OnionskinPrefs {
    fn default() -> Self {
        Self {
            active: false,
            prev_frames: 1,
            next_frames: 1,
        }
    }
}

impl OnionskinPrefs {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        SettingsCoordinator::load_setting(storage, ONIONSKIN_KEY)
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        if let Err(err) = SettingsCoordinator::save_setting(storage, ONIONSKIN_KEY, self) {
            tracing::warn!(%err, "could not save onion-skin preferences");
        }
    }
}

impl PreferencesStore for OnionskinPrefs {
    fn onionskin_active(&self) -> bool {
        self.active
    }

    fn set_onionskin_active(&mut self, active: bool) {
        self.active = active;
    }

    fn onionskin_prev_frames(&self) -> i32 {
        self.prev_frames
    }

    fn set_onionskin_prev_frames(&mut self, frames: i32) {
        self.prev_frames = frames.max(0);
    }

    fn onionskin_next_frames(&self) -> i32 {
        self.next_frames
    }

    fn set_onionskin_next_frames(&mut self, frames: i32) {
        self.next_frames = frames.max(0);
    }
}
