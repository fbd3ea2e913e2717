//! Application-root preference wiring
//!
//! The app root creates both preference stores exactly once and installs them for
//! its lifetime; everything below reaches them through `use_theme()` and
//! `use_translation()`.

use std::sync::Arc;

use rideandgo_core::{FileStore, ProviderGuard, RedrawCallback, SharedStore};
use rideandgo_i18n::{device_locale_from_env, provide_locale, LocaleHandle, LocaleState};
use rideandgo_theme::{provide_theme, ColorScheme, ThemeHandle, ThemeState};

use crate::config::AppConfig;

/// What the host platform reports at startup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Current system color scheme
    pub system_scheme: ColorScheme,
    /// Device locale string, e.g. `fr_FR.UTF-8`
    pub device_locale: Option<String>,
}

impl HostEnvironment {
    /// Read the host environment of this process.
    ///
    /// There is no portable way to query the desktop scheme, so it reports light.
    pub fn detect() -> Self {
        Self {
            system_scheme: ColorScheme::Light,
            device_locale: device_locale_from_env(),
        }
    }
}

/// File-backed storage at the configured path
pub fn open_storage(config: &AppConfig) -> SharedStore {
    Arc::new(FileStore::new(config.storage.path.clone()))
}

/// The two app-wide preference stores
#[derive(Clone)]
pub struct AppPreferences {
    pub theme: ThemeHandle,
    pub locale: LocaleHandle,
}

/// Keeps both stores provided; dropping it closes the scope
#[must_use = "preferences are only provided while the scope is alive"]
pub struct PreferencesScope {
    _theme: ProviderGuard,
    _locale: ProviderGuard,
}

impl AppPreferences {
    /// Load both stores from `storage`
    pub async fn initialize(
        storage: SharedStore,
        config: &AppConfig,
        host: &HostEnvironment,
    ) -> Self {
        let device_locale = if config.locale.detect_device {
            host.device_locale.as_deref()
        } else {
            None
        };

        let theme = ThemeState::initialize(storage.clone(), host.system_scheme).await;
        let locale = LocaleState::initialize(storage, device_locale, config.locale.fallback).await;

        tracing::info!(
            theme = %theme.scheme(),
            follow_system = theme.is_system_theme(),
            locale = %locale.current(),
            "preferences loaded"
        );

        Self {
            theme: theme.into_handle(),
            locale: locale.into_handle(),
        }
    }

    /// Install both stores for the current thread
    pub fn provide(&self) -> PreferencesScope {
        PreferencesScope {
            _theme: provide_theme(self.theme.clone()),
            _locale: provide_locale(self.locale.clone()),
        }
    }

    /// Register one redraw callback for both stores
    pub fn set_redraw_callback(&self, callback: RedrawCallback) {
        self.theme.set_redraw_callback(callback.clone());
        self.locale.set_redraw_callback(callback);
    }

    /// Wait until every queued preference write has been attempted
    pub async fn flush(&self) {
        self.theme.flush().await;
        self.locale.flush().await;
    }
}
