//! TOML-based application configuration.
//!
//! Stores:
//! - Remote exam feed location and timeout
//! - Fallback dates for the built-in exams
//! - Display preferences (seconds, tick period)
//!
//! Configuration is stored at `~/.config/examtab/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::exam::date::parse_date;
use crate::exam::feed::DEFAULT_FEED_URL;
use crate::exam::FallbackDates;

/// Remote feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Fallback dates, `DD-MM-YYYY`. The only place these constants live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_jee_main")]
    pub jee_main: String,
    #[serde(default = "default_neet")]
    pub neet: String,
    #[serde(default = "default_jee_advanced")]
    pub jee_advanced: String,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_seconds: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/examtab/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_true() -> bool {
    true
}
fn default_feed_url() -> String {
    DEFAULT_FEED_URL.into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_jee_main() -> String {
    "29-01-2026".into()
}
fn default_neet() -> String {
    "04-05-2026".into()
}
fn default_jee_advanced() -> String {
    "18-05-2026".into()
}
fn default_tick_ms() -> u64 {
    1000
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            jee_main: default_jee_main(),
            neet: default_neet(),
            jee_advanced: default_jee_advanced(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_seconds: true,
            tick_ms: default_tick_ms(),
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
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

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, validating the result.
    ///
    /// Does not persist; call [`Config::save`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check the values that have structure beyond their type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.feed.url).map_err(|e| ConfigError::InvalidValue {
            key: "feed.url".into(),
            message: e.to_string(),
        })?;
        if self.display.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "display.tick_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        self.fallback_dates().map(|_| ())
    }

    /// Parse the fallback section.
    pub fn fallback_dates(&self) -> Result<FallbackDates, ConfigError> {
        let field = |key: &str, raw: &str| {
            parse_date(Some(raw))
                .map_err(|e| e.to_string())
                .and_then(|d| d.ok_or_else(|| "date is empty".to_string()))
                .map_err(|message| ConfigError::InvalidValue {
                    key: format!("fallback.{key}"),
                    message,
                })
        };
        Ok(FallbackDates {
            jee_main: field("jee_main", &self.fallback.jee_main)?,
            neet: field("neet", &self.fallback.neet)?,
            jee_advanced: field("jee_advanced", &self.fallback.jee_advanced)?,
        })
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed.timeout_secs)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.display.tick_ms.max(1))
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
        assert!(parsed.display.show_seconds);
        assert_eq!(parsed.fallback.jee_advanced, "18-05-2026");
        assert_eq!(parsed.feed.url, DEFAULT_FEED_URL);
    }

    #[test]
    fn default_fallbacks_match_catalog_defaults() {
        let dates = Config::default().fallback_dates().unwrap();
        assert_eq!(dates, FallbackDates::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[display]\nshow_seconds = false\n").unwrap();
        assert!(!cfg.display.show_seconds);
        assert_eq!(cfg.display.tick_ms, 1000);
        assert_eq!(cfg.fallback.neet, "04-05-2026");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("display.show_seconds").as_deref(), Some("true"));
        assert_eq!(cfg.get("feed.timeout_secs").as_deref(), Some("10"));
        assert_eq!(cfg.get("fallback.jee_main").as_deref(), Some("29-01-2026"));
        assert!(cfg.get("display").is_none());
        assert!(cfg.get("display.missing_key").is_none());
    }

    #[test]
    fn set_coerces_by_existing_type() {
        let mut cfg = Config::default();
        cfg.set("display.show_seconds", "false").unwrap();
        cfg.set("feed.timeout_secs", "3").unwrap();
        cfg.set("fallback.neet", "03-05-2027").unwrap();
        assert!(!cfg.display.show_seconds);
        assert_eq!(cfg.feed.timeout_secs, 3);
        assert_eq!(cfg.fallback.neet, "03-05-2027");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("display.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("display", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_values_and_keeps_state() {
        let mut cfg = Config::default();
        assert!(cfg.set("display.show_seconds", "maybe").is_err());
        assert!(cfg.set("fallback.jee_main", "31-02-2026").is_err());
        assert!(cfg.set("feed.url", "not a url").is_err());
        assert!(cfg.set("display.tick_ms", "0").is_err());
        assert_eq!(cfg.fallback.jee_main, "29-01-2026");
        assert_eq!(cfg.display.tick_ms, 1000);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.display.tick_ms, 1000);

        let mut cfg = cfg;
        cfg.set("display.tick_ms", "500").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().display.tick_ms, 500);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
