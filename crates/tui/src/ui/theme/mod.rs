//! Theme styling for the grid surface.
//!
//! Styles are derived from semantic [`roles::ThemeRoles`]; widgets should go
//! through the helpers in [`theme_helpers`] rather than hard-coding colors.

use std::env;

use tracing::debug;

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::Theme;

/// Environment variable forcing a theme regardless of saved settings.
pub const THEME_ENV: &str = "GALLERY_THEME";

/// Resolves a theme id or alias.
pub fn resolve(name: &str) -> Option<Box<dyn Theme>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "nord" | "default" => Some(Box::new(NordTheme::new())),
        "nord-high-contrast" | "nord_hc" | "high-contrast" => Some(Box::new(NordThemeHighContrast::new())),
        _ => None,
    }
}

/// Selects a theme from `GALLERY_THEME`, then the saved preference, then the default.
pub fn load(preferred_theme: Option<&str>) -> Box<dyn Theme> {
    if let Ok(name) = env::var(THEME_ENV)
        && let Some(theme) = resolve(&name)
    {
        return theme;
    }
    if let Some(name) = preferred_theme {
        if let Some(theme) = resolve(name) {
            return theme;
        }
        debug!(theme = name, "unknown preferred theme; using default");
    }
    Box::new(NordTheme::new())
}
