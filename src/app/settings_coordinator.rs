//! Generic settings persistence coordination.
//!
//! Provides a reusable API for persisting shell settings to a
//! [`PreferenceStore`]. The theme mode is stored as a bare literal by the
//! theme engine; everything else goes through here as JSON.

use serde::{Deserialize, Serialize};

use crate::traits::PreferenceStore;

/// Coordinates generic settings persistence.
///
/// Settings are stored as JSON strings. Storage failures and undecodable
/// values fall back to defaults; failed writes are logged and dropped.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from persistent storage with a default fallback.
    ///
    /// # Type Parameters
    /// * `T` - The type to deserialize, must implement Deserialize and Default
    ///
    /// # Arguments
    /// * `store` - The preference store, if one is available
    /// * `key` - The storage key for this setting
    ///
    /// # Returns
    /// The deserialized value if found and valid, otherwise the default value for type T
    ///
    /// # Examples
    /// ```ignore
    /// let collapsed: bool = SettingsCoordinator::load_setting(Some(&store), "sidebar_collapsed");
    /// ```
    pub fn load_setting<T>(store: Option<&dyn PreferenceStore>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(store, key).unwrap_or_default()
    }

    /// Saves a setting to persistent storage.
    ///
    /// # Arguments
    /// * `store` - The preference store (mutable)
    /// * `key` - The storage key for this setting
    /// * `value` - The value to serialize and save
    pub fn save_setting<T>(store: &mut dyn PreferenceStore, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                if let Err(err) = store.set(key, &json_str) {
                    log::warn!("Failed to save setting '{}': {}", key, err);
                }
            }
            Err(err) => log::warn!("Failed to encode setting '{}': {}", key, err),
        }
    }

    /// Loads a setting from persistent storage with a custom default.
    ///
    /// # Returns
    /// The deserialized value if found and valid, otherwise the provided default
    pub fn load_setting_or<T>(store: Option<&dyn PreferenceStore>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(store, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(store: Option<&dyn PreferenceStore>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = match store?.get(key) {
            Ok(value) => value?,
            Err(err) => {
                log::warn!("Failed to read setting '{}': {}", key, err);
                return None;
            }
        };

        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("Discarding undecodable setting '{}': {}", key, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_save_and_load_simple() {
        let mut store = MemoryStore::new();

        SettingsCoordinator::save_setting(&mut store, "test_key", &42i32);

        let loaded: i32 = SettingsCoordinator::load_setting(Some(&store), "test_key");
        assert_eq!(loaded, 42);
    }

    #[test]
    fn test_load_with_default() {
        let store = MemoryStore::new();

        let loaded: i32 = SettingsCoordinator::load_setting(Some(&store), "missing_key");
        assert_eq!(loaded, 0);

        let loaded: bool = SettingsCoordinator::load_setting(None, "missing_key");
        assert!(!loaded);
    }

    #[test]
    fn test_load_setting_or_uses_custom_default() {
        let store = MemoryStore::new();
        store.insert_raw("width", "not json");

        let width: f32 = SettingsCoordinator::load_setting_or(Some(&store), "width", 240.0);
        assert_eq!(width, 240.0);
    }

    #[test]
    fn test_try_load_setting() {
        let mut store = MemoryStore::new();

        let result: Option<i32> = SettingsCoordinator::try_load_setting(Some(&store), "missing");
        assert_eq!(result, None);

        SettingsCoordinator::save_setting(&mut store, "test", &123i32);
        let result: Option<i32> = SettingsCoordinator::try_load_setting(Some(&store), "test");
        assert_eq!(result, Some(123));
    }

    #[test]
    fn test_unavailable_store_falls_back() {
        let mut store = MemoryStore::new();
        SettingsCoordinator::save_setting(&mut store, "collapsed", &true);
        store.set_unavailable(true);

        let collapsed: bool = SettingsCoordinator::load_setting(Some(&store), "collapsed");
        assert!(!collapsed);

        SettingsCoordinator::save_setting(&mut store, "collapsed", &false);
        assert_eq!(store.raw("collapsed").as_deref(), Some("true"));
    }
}
