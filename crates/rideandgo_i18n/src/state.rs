//! Locale state
//!
//! LocaleState owns the current [`Locale`] and resolves strings against its
//! built-in catalog. Like the theme, it is created once at startup, shared as a
//! [`LocaleHandle`] and reached through [`use_translation`] inside a provider scope.

use std::sync::Arc;

use rideandgo_core::{
    provide, try_use_context, Preference, PreferenceStore, ProviderGuard, RedrawCallback,
    SharedStore,
};
use tokio::sync::watch;
use tracing::debug;

use crate::catalogs::builtin_catalog;
use crate::label::{Label, Message};
use crate::locale::Locale;
use crate::simple::SimpleCatalog;

/// Shared handle passed to providers
pub type LocaleHandle = Arc<LocaleState>;

/// App-wide locale state
pub struct LocaleState {
    store: PreferenceStore<Locale>,
}

impl LocaleState {
    /// Load the persisted locale.
    ///
    /// Without a usable stored tag the device locale is used when it is supported,
    /// and `fallback` otherwise.
    pub async fn initialize(
        storage: SharedStore,
        device_locale: Option<&str>,
        fallback: Locale,
    ) -> Self {
        let default = device_locale
            .and_then(Locale::from_locale_str)
            .unwrap_or(fallback);
        let store = PreferenceStore::initialize(storage, default).await;
        debug!(locale = %store.current(), ?device_locale, "LocaleState initialized");
        Self { store }
    }

    /// Convenience for wrapping in a [`LocaleHandle`]
    pub fn into_handle(self) -> LocaleHandle {
        Arc::new(self)
    }

    /// Current locale
    pub fn current(&self) -> Locale {
        self.store.current()
    }

    /// Switch locale and persist the choice
    pub fn set(&self, locale: Locale) {
        self.store.set(locale);
    }

    /// Switch locale by tag.
    ///
    /// Tags outside the supported set are ignored. Returns whether the tag was accepted.
    pub fn set_tag(&self, tag: &str) -> bool {
        match <Locale as Preference>::from_tag(tag) {
            Some(locale) => {
                self.set(locale);
                true
            }
            None => {
                debug!(tag, "ignoring unsupported locale");
                false
            }
        }
    }

    /// Catalog of the current locale
    pub fn catalog(&self) -> &'static SimpleCatalog {
        builtin_catalog(self.current())
    }

    /// String for `key` in the current locale, or `key` itself when it has no entry
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.catalog().get(key).unwrap_or(key)
    }

    /// Format a message in the current locale, or return its id when it has no entry
    pub fn tr(&self, msg: &Message) -> String {
        self.catalog()
            .format_message(msg)
            .unwrap_or_else(|| msg.id.to_string())
    }

    pub fn resolve_label(&self, label: &Label) -> String {
        match label {
            Label::Raw(s) => s.clone(),
            Label::Msg(m) => self.tr(m),
        }
    }

    // ========== Change Notification ==========

    /// Watch channel that yields every locale change
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.store.subscribe()
    }

    /// Register the callback fired after each locale change
    pub fn set_redraw_callback(&self, callback: RedrawCallback) {
        self.store.set_redraw_callback(callback);
    }

    /// Wait until queued writes have been attempted
    pub async fn flush(&self) {
        self.store.flush().await;
    }
}

// ========== Ambient Access ==========

/// Make `locale` available to [`use_translation`] until the guard drops
pub fn provide_locale(locale: LocaleHandle) -> ProviderGuard {
    provide(locale)
}

/// Locale state from the innermost provider, if any
pub fn try_use_translation() -> Option<LocaleHandle> {
    try_use_context::<LocaleHandle>()
}

/// Locale state from the innermost provider.
///
/// # Panics
///
/// Panics when called outside a locale provider scope.
pub fn use_translation() -> LocaleHandle {
    try_use_translation()
        .unwrap_or_else(|| panic!("use_translation() called outside an I18nProvider scope"))
}
