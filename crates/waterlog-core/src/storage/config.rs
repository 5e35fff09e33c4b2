//! TOML-based user preferences.
//!
//! Stores the notification payload and the default reminder interval.
//! Preferences live at `~/.config/waterlog/config.toml`. The reminder
//! on/off state itself is not a preference; it lives in the key-value
//! store next to the counter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::notify::{ReminderPayload, DEFAULT_BODY, DEFAULT_TITLE};

use super::data_dir;

/// Notification payload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_body")]
    pub body: String,
}

/// Reminder defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderDefaults {
    /// Interval preset used when no reminder state has been persisted yet.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
}

/// User preferences.
///
/// Serialized to/from TOML at `~/.config/waterlog/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub reminder: ReminderDefaults,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_body() -> String {
    DEFAULT_BODY.to_string()
}
fn default_interval_minutes() -> u32 {
    60
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            body: default_body(),
        }
    }
}

impl Default for ReminderDefaults {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications: NotificationsConfig::default(),
            reminder: ReminderDefaults::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown preference key".to_string(),
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "preference key is empty".to_string(),
            });
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences file exists but cannot be parsed,
    /// or if the default preferences cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a preference value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a preference value by key. Returns an error if the key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the preferences cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }

    /// Notification payload delivered with every reminder.
    pub fn payload(&self) -> ReminderPayload {
        ReminderPayload {
            title: self.notifications.title.clone(),
            body: self.notifications.body.clone(),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.reminder.interval_minutes, 60);
        assert_eq!(parsed.notifications.title, cfg.notifications.title);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get("reminder.interval_minutes").as_deref(),
            Some("60")
        );
        assert!(cfg.get("notifications.title").is_some());
        assert!(cfg.get("notifications.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "reminder.interval_minutes", "120").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "reminder.interval_minutes").unwrap(),
            &serde_json::Value::Number(120.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.title", "Drink up").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.title").unwrap(),
            &serde_json::Value::String("Drink up".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "notifications.volume", "50");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_non_numeric_for_number_field() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "reminder.interval_minutes", "an hour");
        assert!(result.is_err());
    }

    #[test]
    fn payload_reflects_notification_preferences() {
        let mut cfg = Config::default();
        cfg.notifications.title = "title".to_string();
        cfg.notifications.body = "body".to_string();
        let payload = cfg.payload();
        assert_eq!(payload.title, "title");
        assert_eq!(payload.body, "body");
    }
}
