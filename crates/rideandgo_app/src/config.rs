//! RideAndGo configuration file handling

use std::fs;
use std::path::{Path, PathBuf};

use rideandgo_geo::{FareSchedule, GeoConfig};
use rideandgo_i18n::Locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up by [`AppConfig::load_from_dir`]
pub const CONFIG_FILE_NAME: &str = "rideandgo.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration (rideandgo.toml).
///
/// Every section and field is optional; an empty file yields [`AppConfig::default`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub geo: GeoConfig,
    #[serde(default)]
    pub fare: FareSchedule,
}

/// Where preferences are persisted
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON file holding the preference entries
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".rideandgo/preferences.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Locale selection when nothing is stored yet
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LocaleConfig {
    /// Used when the device locale is unknown or unsupported
    #[serde(default)]
    pub fallback: Locale,
    /// Prefer the device locale over the fallback
    #[serde(default = "default_true")]
    pub detect_device: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            fallback: Locale::default(),
            detect_device: true,
        }
    }
}

/// Log output
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `rideandgo_core=debug`; `RUST_LOG` wins
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file that must exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load configuration from a directory (looks for rideandgo.toml).
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load_from_dir(path: &Path) -> Result<Self, ConfigError> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE_NAME)
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("rideandgo.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.locale.fallback, Locale::En);
        assert_eq!(config.fare, FareSchedule::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let src = r#"
[locale]
fallback = "fr"

[fare]
per_km = 1.5

[geo]
timeout_secs = 3
"#;
        let config = AppConfig::from_toml_str(src, Path::new("rideandgo.toml")).unwrap();
        assert_eq!(config.locale.fallback, Locale::Fr);
        assert!(config.locale.detect_device);
        assert_eq!(config.fare.per_km, 1.5);
        assert_eq!(config.fare.base_fare, 3.5);
        assert_eq!(config.geo.timeout_secs, 3);
        assert_eq!(config.geo.search_url, GeoConfig::default().search_url);
    }

    #[test]
    fn unsupported_locale_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[locale]\nfallback = \"de\"\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse x.toml"));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.storage.path = PathBuf::from("/tmp/prefs.json");
        config.logging.level = "rideandgo_core=debug".to_string();

        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml_str(&text, Path::new("rideandgo.toml")).unwrap();
        assert_eq!(parsed, config);
    }
}
