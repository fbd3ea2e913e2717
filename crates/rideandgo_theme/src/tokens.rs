//! Color tokens for theming

use rideandgo_core::Color;

/// Semantic color roles for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Surfaces
    Background,
    Card,
    Border,
    Shadow,

    // Text
    Text,

    // Brand colors
    Primary,
    PrimaryLight,
    PrimaryDark,
    Secondary,
    SecondaryLight,
    SecondaryDark,
    Accent,

    // Semantic colors
    Success,
    Error,
    Warning,
    Info,
}

impl ColorToken {
    /// Every role, in palette declaration order
    pub fn all() -> &'static [ColorToken] {
        const TOKENS: [ColorToken; 16] = [
            ColorToken::Background,
            ColorToken::Card,
            ColorToken::Border,
            ColorToken::Shadow,
            ColorToken::Text,
            ColorToken::Primary,
            ColorToken::PrimaryLight,
            ColorToken::PrimaryDark,
            ColorToken::Secondary,
            ColorToken::SecondaryLight,
            ColorToken::SecondaryDark,
            ColorToken::Accent,
            ColorToken::Success,
            ColorToken::Error,
            ColorToken::Warning,
            ColorToken::Info,
        ];
        &TOKENS
    }

    /// Variable name used in CSS maps (`primary-light`, `text`, ...)
    pub fn css_name(self) -> &'static str {
        match self {
            ColorToken::Background => "background",
            ColorToken::Card => "card",
            ColorToken::Border => "border",
            ColorToken::Shadow => "shadow",
            ColorToken::Text => "text",
            ColorToken::Primary => "primary",
            ColorToken::PrimaryLight => "primary-light",
            ColorToken::PrimaryDark => "primary-dark",
            ColorToken::Secondary => "secondary",
            ColorToken::SecondaryLight => "secondary-light",
            ColorToken::SecondaryDark => "secondary-dark",
            ColorToken::Accent => "accent",
            ColorToken::Success => "success",
            ColorToken::Error => "error",
            ColorToken::Warning => "warning",
            ColorToken::Info => "info",
        }
    }
}

/// Complete set of semantic colors for one scheme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub card: Color,
    pub border: Color,
    pub shadow: Color,

    pub text: Color,

    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,
    pub secondary: Color,
    pub secondary_light: Color,
    pub secondary_dark: Color,
    pub accent: Color,

    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Palette {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Card => self.card,
            ColorToken::Border => self.border,
            ColorToken::Shadow => self.shadow,
            ColorToken::Text => self.text,
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryLight => self.primary_light,
            ColorToken::PrimaryDark => self.primary_dark,
            ColorToken::Secondary => self.secondary,
            ColorToken::SecondaryLight => self.secondary_light,
            ColorToken::SecondaryDark => self.secondary_dark,
            ColorToken::Accent => self.accent,
            ColorToken::Success => self.success,
            ColorToken::Error => self.error,
            ColorToken::Warning => self.warning,
            ColorToken::Info => self.info,
        }
    }
}
