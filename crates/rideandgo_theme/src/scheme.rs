//! Color scheme preference

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rideandgo_core::Preference;
use serde::{Deserialize, Serialize};

/// Storage key holding the explicit theme choice
pub const THEME_STORAGE_KEY: &str = "@rideandgo_theme";

/// Storage key holding whether the theme follows the system scheme (`"true"`/`"false"`)
pub const SYSTEM_THEME_KEY: &str = "@rideandgo_use_system_theme";

/// Light or dark mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

impl Preference for ColorScheme {
    const STORAGE_KEY: &'static str = THEME_STORAGE_KEY;
    const NAME: &'static str = "theme";

    fn tag(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "light" => Some(ColorScheme::Light),
            "dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }

    fn all() -> &'static [Self] {
        const SCHEMES: [ColorScheme; 2] = [ColorScheme::Light, ColorScheme::Dark];
        &SCHEMES
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unknown scheme tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownScheme(pub String);

impl Display for UnknownScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown color scheme `{}` (expected light or dark)", self.0)
    }
}

impl std::error::Error for UnknownScheme {}

impl FromStr for ColorScheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim()).ok_or_else(|| UnknownScheme(s.to_string()))
    }
}
