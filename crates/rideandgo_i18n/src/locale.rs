//! Supported locales and locale-string handling

use std::fmt;
use std::str::FromStr;

use rideandgo_core::Preference;
use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// Storage key of the persisted locale tag
pub const LOCALE_STORAGE_KEY: &str = "@rideandgo_language";

/// Languages with a built-in catalog.
///
/// Adding a language means adding a variant here and a catalog under `locales/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    #[default]
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Fr, Locale::En];

    /// Stable two-letter tag
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// Name of the language in that language
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::Fr => "Français",
            Locale::En => "English",
        }
    }

    /// Match a host locale string (`fr_FR.UTF-8`, `en-GB`, `FR`) on its language subtag
    pub fn from_locale_str(s: &str) -> Option<Self> {
        let normalized = normalize_locale(s);
        let language = normalized.split('-').next()?.to_ascii_lowercase();
        Self::from_tag(&language)
    }
}

impl Preference for Locale {
    const STORAGE_KEY: &'static str = LOCALE_STORAGE_KEY;
    const NAME: &'static str = "locale";

    fn tag(self) -> &'static str {
        Locale::tag(self)
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag)
    }

    fn all() -> &'static [Self] {
        &Self::ALL
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    /// Exact tag only; use [`Locale::from_locale_str`] for host locale strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Locale as Preference>::from_tag(s.trim())
            .ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}

/// Normalize a locale identifier for matching.
///
/// - Trims whitespace
/// - Drops a POSIX encoding or modifier suffix (`.UTF-8`, `@euro`)
/// - Converts `_` to `-` (`fr_FR` -> `fr-FR`)
pub fn normalize_locale(s: &str) -> String {
    let s = s.trim();
    let end = s.find(['.', '@']).unwrap_or(s.len());
    s[..end].replace('_', "-")
}

/// Locale of the host environment, from `LC_ALL`, `LC_MESSAGES` or `LANG`
pub fn device_locale_from_env() -> Option<String> {
    device_locale_from(|name| std::env::var(name).ok())
}

fn device_locale_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(lookup)
        .map(|value| normalize_locale(&value))
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}
