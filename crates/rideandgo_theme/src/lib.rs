//! RideAndGo Theme System
//!
//! Light/dark theming with persisted user choice.
//!
//! # Overview
//!
//! - **Palettes**: one fixed [`Palette`] per [`ColorScheme`], looked up by tag
//! - **State**: [`ThemeState`] holds the current scheme, persists explicit choices,
//!   and can follow the host's scheme instead
//! - **Ambient access**: [`provide_theme`] / [`use_theme`] reach the state from
//!   anywhere below the app root
//! - **Style helpers**: contrast and interaction-state colors via [`ThemedStyles`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rideandgo_theme::{ColorScheme, ColorToken, ThemeState, provide_theme, use_theme};
//!
//! let theme = ThemeState::initialize(storage, ColorScheme::Light).await.into_handle();
//! let _guard = provide_theme(theme);
//!
//! // In a widget:
//! let theme = use_theme();
//! let primary = theme.color(ColorToken::Primary);
//! theme.toggle_scheme();
//! ```

pub mod scheme;
pub mod state;
pub mod styles;
pub mod themes;
pub mod tokens;

pub use scheme::{ColorScheme, UnknownScheme, SYSTEM_THEME_KEY, THEME_STORAGE_KEY};
pub use state::{provide_theme, try_use_theme, use_theme, ThemeHandle, ThemeState};
pub use styles::ThemedStyles;
pub use themes::{palette_for, DARK, LIGHT};
pub use tokens::{ColorToken, Palette};
