//! RideAndGo internationalization (i18n)
//!
//! - Two supported locales, French and English, each with a catalog compiled
//!   into the binary
//! - Persisted locale choice, defaulting to the device language when supported
//! - [`Label`]s that are either raw text or translatable messages with arguments
//! - Ambient access through [`provide_locale`] / [`use_translation`]
//!
//! Lookups never cross locales: a key missing from the current catalog renders
//! as the key itself.

mod catalogs;
mod error;
mod label;
mod locale;
mod simple;
mod state;

pub use catalogs::{builtin_catalog, parse_builtin};
pub use error::I18nError;
pub use label::{ArgValue, Label, Message};
pub use locale::{device_locale_from_env, normalize_locale, Locale, LOCALE_STORAGE_KEY};
pub use simple::{SimpleCatalog, SimpleParseError};
pub use state::{provide_locale, try_use_translation, use_translation, LocaleHandle, LocaleState};

/// Resolve a label against the ambient [`LocaleState`].
///
/// Outside a provider this degrades instead of panicking: raw labels return their
/// text and messages return their key.
pub fn resolve_label(label: &Label) -> String {
    match try_use_translation() {
        Some(locale) => locale.resolve_label(label),
        None => match label {
            Label::Raw(s) => s.clone(),
            Label::Msg(m) => m.id.to_string(),
        },
    }
}

/// Build a translatable [`Label`].
///
/// - `t!("whereToGo")`
/// - `t!("fareSummary", { fare: 12.5 })`
#[macro_export]
macro_rules! t {
    ($id:literal) => {
        $crate::Label::msg($crate::Message::new($id))
    };
    ($id:literal, { $($name:ident : $value:expr),* $(,)? }) => {{
        let mut m = $crate::Message::new($id);
        $(
            m = m.arg(stringify!($name), $value);
        )*
        $crate::Label::msg(m)
    }};
}
