//! Theme state
//!
//! ThemeState owns the current [`ColorScheme`] for the running app. It is created
//! once at startup, shared as a [`ThemeHandle`], and reached by widgets through
//! [`use_theme`] inside a provider scope.
//!
//! Two modes:
//! - **explicit**: the user picked light or dark; the choice is persisted
//! - **follow system**: the scheme tracks whatever the host reports

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use rideandgo_core::{
    provide, try_use_context, Color, KeyValueStore, PreferenceStore, ProviderGuard,
    RedrawCallback, SharedStore,
};
use tokio::sync::watch;

use crate::scheme::{ColorScheme, SYSTEM_THEME_KEY};
use crate::styles::ThemedStyles;
use crate::themes::palette_for;
use crate::tokens::{ColorToken, Palette};

/// Shared handle passed to providers
pub type ThemeHandle = Arc<ThemeState>;

/// App-wide theme state
pub struct ThemeState {
    store: PreferenceStore<ColorScheme>,

    /// Whether the scheme tracks the host scheme
    follow_system: AtomicBool,

    /// Serializes mode changes so the flag and its queued writes agree
    mode: Mutex<()>,

    /// Last scheme reported by the host
    system_scheme: RwLock<ColorScheme>,
}

impl ThemeState {
    /// Load the persisted theme.
    ///
    /// `system_scheme` is the host's current scheme; it is only adopted when the
    /// follow-system flag was persisted as `"true"`. Otherwise the stored theme tag
    /// is used, or light when it is absent or unusable.
    pub async fn initialize(storage: SharedStore, system_scheme: ColorScheme) -> Self {
        let follow_system = read_follow_system(storage.as_ref()).await;

        let store = if follow_system {
            PreferenceStore::with_value(storage, system_scheme)
        } else {
            PreferenceStore::initialize(storage, ColorScheme::Light).await
        };

        tracing::debug!(
            scheme = %store.current(),
            follow_system,
            "ThemeState initialized"
        );

        Self {
            store,
            follow_system: AtomicBool::new(follow_system),
            mode: Mutex::new(()),
            system_scheme: RwLock::new(system_scheme),
        }
    }

    /// Convenience for wrapping in a [`ThemeHandle`]
    pub fn into_handle(self) -> ThemeHandle {
        Arc::new(self)
    }

    // ========== Color Scheme ==========

    /// Current color scheme
    pub fn scheme(&self) -> ColorScheme {
        self.store.current()
    }

    /// Palette for the current scheme
    pub fn palette(&self) -> &'static Palette {
        palette_for(self.scheme())
    }

    /// Current scheme together with its palette
    pub fn get_current(&self) -> (ColorScheme, &'static Palette) {
        let scheme = self.scheme();
        (scheme, palette_for(scheme))
    }

    /// Explicitly choose a scheme.
    ///
    /// Leaves follow-system mode and persists both the scheme and the flag.
    pub fn set_scheme(&self, scheme: ColorScheme) {
        let _mode = self.mode.lock().unwrap();
        self.follow_system.store(false, Ordering::SeqCst);
        self.store.set(scheme);
        self.store.persister().persist(SYSTEM_THEME_KEY, "false");
    }

    /// Toggle between light and dark mode
    pub fn toggle_scheme(&self) {
        let _mode = self.mode.lock().unwrap();
        self.follow_system.store(false, Ordering::SeqCst);
        self.store.set(self.scheme().toggle());
        self.store.persister().persist(SYSTEM_THEME_KEY, "false");
    }

    // ========== System Scheme ==========

    /// Whether the scheme currently follows the host
    pub fn is_system_theme(&self) -> bool {
        self.follow_system.load(Ordering::SeqCst)
    }

    /// Switch to follow-system mode and adopt the host scheme
    pub fn use_system_theme(&self) {
        let _mode = self.mode.lock().unwrap();
        self.follow_system.store(true, Ordering::SeqCst);
        let system = *self.system_scheme.read().unwrap();
        self.store.set_transient(system);
        self.store.persister().persist(SYSTEM_THEME_KEY, "true");
    }

    /// Record a host scheme change; adopted immediately in follow-system mode
    pub fn set_system_scheme(&self, scheme: ColorScheme) {
        let _mode = self.mode.lock().unwrap();
        *self.system_scheme.write().unwrap() = scheme;
        if self.is_system_theme() {
            self.store.set_transient(scheme);
        }
    }

    /// Last scheme reported by the host
    pub fn system_scheme(&self) -> ColorScheme {
        *self.system_scheme.read().unwrap()
    }

    // ========== Color Access ==========

    /// Get a color token value for the current scheme
    pub fn color(&self, token: ColorToken) -> Color {
        self.palette().get(token)
    }

    /// Style helpers bound to the current scheme
    pub fn styles(&self) -> ThemedStyles {
        let (scheme, palette) = self.get_current();
        ThemedStyles::new(scheme, palette)
    }

    /// CSS variable map of the current palette.
    ///
    /// Keys are role names without the `--` prefix (`primary-light`); values are
    /// `#rrggbb` or `rgba(...)` for translucent roles.
    pub fn to_css_variable_map(&self) -> HashMap<String, String> {
        let palette = self.palette();
        ColorToken::all()
            .iter()
            .map(|token| (token.css_name().to_string(), palette.get(*token).to_css()))
            .collect()
    }

    // ========== Change Notification ==========

    /// Watch channel that yields every scheme change
    pub fn subscribe(&self) -> watch::Receiver<ColorScheme> {
        self.store.subscribe()
    }

    /// Register the callback fired after each scheme change
    pub fn set_redraw_callback(&self, callback: RedrawCallback) {
        self.store.set_redraw_callback(callback);
    }

    /// Wait until queued writes have been attempted
    pub async fn flush(&self) {
        self.store.flush().await;
    }
}

async fn read_follow_system(storage: &dyn KeyValueStore) -> bool {
    match storage.get(SYSTEM_THEME_KEY).await {
        Ok(value) => value.as_deref() == Some("true"),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read follow-system flag");
            false
        }
    }
}

// ========== Ambient Access ==========

/// Make `theme` available to [`use_theme`] until the guard drops
pub fn provide_theme(theme: ThemeHandle) -> ProviderGuard {
    provide(theme)
}

/// Theme state from the innermost provider, if any
pub fn try_use_theme() -> Option<ThemeHandle> {
    try_use_context::<ThemeHandle>()
}

/// Theme state from the innermost provider.
///
/// # Panics
///
/// Panics when called outside a theme provider scope.
pub fn use_theme() -> ThemeHandle {
    try_use_theme()
        .unwrap_or_else(|| panic!("use_theme() called outside a ThemeProvider scope"))
}
