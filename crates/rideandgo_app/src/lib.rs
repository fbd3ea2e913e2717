//! RideAndGo application layer
//!
//! Glue shared by every entry point:
//!
//! - [`AppConfig`]: `rideandgo.toml`, every field defaulted
//! - [`init_logging`]: tracing subscriber honoring `RUST_LOG`
//! - [`AppPreferences`]: creates the theme and locale stores once and provides them

pub mod config;
pub mod context;
pub mod logging;

pub use config::{
    AppConfig, ConfigError, LocaleConfig, LoggingConfig, StorageConfig, CONFIG_FILE_NAME,
};
pub use context::{open_storage, AppPreferences, HostEnvironment, PreferencesScope};
pub use logging::init_logging;
