//! Settings persistence coordination.
//!
//! Provides a reusable API for persisting timeline settings (layout
//! configuration, onion-skin preferences) to eframe's key/value storage.
//! Values are stored as JSON strings.

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Coordinates generic settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from persistent storage with a default fallback.
    ///
    /// Undecodable values are logged and replaced by the default.
    ///
    /// # Examples
    /// ```ignore
    /// let config: TimelineConfig = SettingsCoordinator::load_setting(storage, TIMELINE_CONFIG_KEY);
    /// ```
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::load_setting_or(storage, key, T::default())
    }

    /// Loads a setting from persistent storage with a custom default.
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        match Self::try_load_setting(storage, key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                tracing::warn!(%err, "falling back to default setting");
                default
            }
        }
    }

    /// Attempts to load a setting.
    ///
    /// # Returns
    /// `Ok(None)` if there is no storage or no value under `key`, an error
    /// if the stored value does not decode as `T`.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> TimelineResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.and_then(|s| s.get_string(key)) else {
            return Ok(None);
        };
        serde_json::from_str(&json_str)
            .map(Some)
            .map_err(|source| TimelineError::Setting {
                key: key.to_string(),
                source,
            })
    }

    /// Saves a setting to persistent storage and flushes it.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T) -> TimelineResult<()>
    where
        T: Serialize,
    {
        let json_str = serde_json::to_string(value).map_err(|source| TimelineError::SettingEncode {
            key: key.to_string(),
            source,
        })?;
        storage.set_string(key, json_str);
        storage.flush();
        Ok(())
    }
}
