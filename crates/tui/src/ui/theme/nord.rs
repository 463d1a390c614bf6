//! Nord palette mapped onto the grid's theme roles, in default and
//! high-contrast variants.

use ratatui::style::Color;

use super::{
    roles::{Theme, ThemeRoles},
    theme_helpers::{darken_rgb, lighten_rgb},
};

// Polar Night
pub const N0: Color = Color::Rgb(0x2E, 0x34, 0x40);
pub const N1: Color = Color::Rgb(0x3B, 0x42, 0x52);
pub const N2: Color = Color::Rgb(0x43, 0x4C, 0x5E);
pub const N3: Color = Color::Rgb(0x4C, 0x56, 0x6A);

// Snow Storm
pub const S0: Color = Color::Rgb(0xD8, 0xDE, 0xE9);
pub const S1: Color = Color::Rgb(0xE5, 0xE9, 0xF0);
pub const S2: Color = Color::Rgb(0xEC, 0xEF, 0xF4);

// Frost
pub const F0: Color = Color::Rgb(0x8F, 0xBC, 0xBB);
pub const F1: Color = Color::Rgb(0x88, 0xC0, 0xD0);
pub const F3: Color = Color::Rgb(0x5E, 0x81, 0xAC);

// Aurora
pub const A_YELLOW: Color = Color::Rgb(0xEB, 0xCB, 0x8B);
pub const A_PURPLE: Color = Color::Rgb(0xB4, 0x8E, 0xAD);

const TEXT_MUTED: Color = Color::Rgb(0x61, 0x6E, 0x88);

fn build_nord_roles() -> ThemeRoles {
    ThemeRoles {
        background: N0,
        surface: N1,
        surface_muted: N2,
        border: N1,

        text: S0,
        text_secondary: S1,
        text_muted: TEXT_MUTED,

        accent_primary: F1,

        selection_bg: N3,
        selection_fg: S2,
        focus: F1,

        scrollbar_track: N3,
        scrollbar_thumb: F0,

        table_row_even: darken_rgb(N1, 0.60),
        table_row_odd: darken_rgb(N2, 0.60),
        image_link: A_PURPLE,
    }
}

fn build_nord_high_contrast_roles() -> ThemeRoles {
    let mut roles = build_nord_roles();
    roles.border = lighten_rgb(roles.border, 0.30);
    roles.text = S2;
    roles.text_secondary = S2;
    roles.text_muted = S1;
    roles.accent_primary = A_YELLOW;
    roles.selection_bg = lighten_rgb(roles.selection_bg, 0.10);
    roles.focus = F3;
    roles.table_row_even = darken_rgb(N1, 0.50);
    roles.table_row_odd = darken_rgb(N3, 0.50);
    roles
}

/// Default Nord theme tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct NordTheme {
    roles: ThemeRoles,
}

impl NordTheme {
    pub fn new() -> Self {
        Self { roles: build_nord_roles() }
    }
}

impl Default for NordTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for NordTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Brighter text and borders over the same palette.
#[derive(Debug, Clone)]
pub struct NordThemeHighContrast {
    roles: ThemeRoles,
}

impl NordThemeHighContrast {
    pub fn new() -> Self {
        Self {
            roles: build_nord_high_contrast_roles(),
        }
    }
}

impl Default for NordThemeHighContrast {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for NordThemeHighContrast {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
