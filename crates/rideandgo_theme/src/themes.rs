//! RideAndGo brand palettes
//!
//! Orange primary with a deep navy secondary. The primary and its gradient
//! steps are shared by both schemes so the brand reads the same in dark mode.

use crate::scheme::ColorScheme;
use crate::tokens::Palette;
use rideandgo_core::Color;

/// Brand colors shared by both schemes
pub mod brand {
    use rideandgo_core::Color;

    pub const ORANGE: Color = Color::rgb(255.0 / 255.0, 140.0 / 255.0, 0.0 / 255.0);
    pub const ORANGE_LIGHT: Color = Color::rgb(255.0 / 255.0, 170.0 / 255.0, 66.0 / 255.0);
    pub const ORANGE_DARK: Color = Color::rgb(230.0 / 255.0, 126.0 / 255.0, 0.0 / 255.0);
    pub const ORANGE_ACCENT: Color = Color::rgb(255.0 / 255.0, 159.0 / 255.0, 28.0 / 255.0);

    pub const NAVY: Color = Color::rgb(27.0 / 255.0, 38.0 / 255.0, 59.0 / 255.0);
    pub const NAVY_LIGHT: Color = Color::rgb(44.0 / 255.0, 60.0 / 255.0, 89.0 / 255.0);
    pub const NAVY_DARK: Color = Color::rgb(17.0 / 255.0, 25.0 / 255.0, 39.0 / 255.0);
}

/// Light scheme
pub static LIGHT: Palette = Palette {
    background: Color::WHITE,
    card: Color::rgb(242.0 / 255.0, 242.0 / 255.0, 247.0 / 255.0),
    border: Color::rgb(229.0 / 255.0, 229.0 / 255.0, 234.0 / 255.0),
    shadow: Color::new(0.0, 0.0, 0.0, 0.1),

    text: Color::BLACK,

    primary: brand::ORANGE,
    primary_light: brand::ORANGE_LIGHT,
    primary_dark: brand::ORANGE_DARK,
    secondary: brand::NAVY,
    secondary_light: brand::NAVY_LIGHT,
    secondary_dark: brand::NAVY_DARK,
    accent: brand::ORANGE_ACCENT,

    success: Color::rgb(76.0 / 255.0, 175.0 / 255.0, 80.0 / 255.0),
    error: Color::rgb(244.0 / 255.0, 67.0 / 255.0, 54.0 / 255.0),
    warning: Color::rgb(255.0 / 255.0, 193.0 / 255.0, 7.0 / 255.0),
    info: Color::rgb(33.0 / 255.0, 150.0 / 255.0, 243.0 / 255.0),
};

/// Dark scheme
pub static DARK: Palette = Palette {
    background: Color::rgb(18.0 / 255.0, 18.0 / 255.0, 18.0 / 255.0),
    card: Color::rgb(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0),
    border: Color::rgb(56.0 / 255.0, 56.0 / 255.0, 56.0 / 255.0),
    shadow: Color::new(0.0, 0.0, 0.0, 0.3),

    text: Color::WHITE,

    primary: brand::ORANGE,
    primary_light: brand::ORANGE_LIGHT,
    primary_dark: brand::ORANGE_DARK,
    secondary: brand::NAVY,
    secondary_light: brand::NAVY_LIGHT,
    secondary_dark: brand::NAVY_DARK,
    // Lighter accent keeps contrast on dark surfaces
    accent: brand::ORANGE_LIGHT,

    success: Color::rgb(129.0 / 255.0, 199.0 / 255.0, 132.0 / 255.0),
    error: Color::rgb(229.0 / 255.0, 115.0 / 255.0, 115.0 / 255.0),
    warning: Color::rgb(255.0 / 255.0, 213.0 / 255.0, 79.0 / 255.0),
    info: Color::rgb(100.0 / 255.0, 181.0 / 255.0, 246.0 / 255.0),
};

/// Palette for a scheme
pub fn palette_for(scheme: ColorScheme) -> &'static Palette {
    match scheme {
        ColorScheme::Light => &LIGHT,
        ColorScheme::Dark => &DARK,
    }
}
