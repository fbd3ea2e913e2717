//! Derived colors for interactive states

use rideandgo_core::Color;

use crate::scheme::ColorScheme;
use crate::tokens::Palette;

/// Amount interaction states shift a color by
const INTERACTION_SHIFT: f32 = 0.1;

/// Scheme-aware style helpers, snapshotted from a [`ThemeState`](crate::ThemeState)
#[derive(Clone, Copy, Debug)]
pub struct ThemedStyles {
    scheme: ColorScheme,
    palette: &'static Palette,
}

impl ThemedStyles {
    pub fn new(scheme: ColorScheme, palette: &'static Palette) -> Self {
        Self { scheme, palette }
    }

    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    /// Text color readable on `background`.
    ///
    /// Brand backgrounds always get white; anything else follows the scheme.
    pub fn contrast_color(&self, background: Color) -> Color {
        let on_brand = background == self.palette.primary || background == self.palette.secondary;
        if on_brand || self.is_dark() {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }

    /// Color for a pressed control
    pub fn pressed_color(&self, color: Color) -> Color {
        if self.is_dark() {
            color.darken(INTERACTION_SHIFT)
        } else {
            color.lighten(INTERACTION_SHIFT)
        }
    }

    /// Color for a hovered control
    pub fn hover_color(&self, color: Color) -> Color {
        if self.is_dark() {
            color.lighten(INTERACTION_SHIFT)
        } else {
            color.darken(INTERACTION_SHIFT)
        }
    }
}
