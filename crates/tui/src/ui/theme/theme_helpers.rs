use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Header labels: secondary text, bold.
pub fn table_header_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.text_secondary_style().add_modifier(Modifier::BOLD)
}

/// Background for the whole header row so gaps between columns match.
pub fn table_header_row_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default().bg(theme.roles().surface_muted).fg(theme.roles().text_secondary)
}

/// Zebra-striped body row style.
pub fn table_row_style<T: Theme + ?Sized>(theme: &T, row_index: usize) -> Style {
    let roles = theme.roles();
    let bg = if row_index % 2 == 0 {
        roles.table_row_even
    } else {
        roles.table_row_odd
    };
    Style::default().bg(bg).fg(roles.text)
}

/// Row under the pointer.
pub fn table_hover_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

pub fn image_cell_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default().fg(theme.roles().image_link).add_modifier(Modifier::UNDERLINED)
}

pub fn status_bar_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default().bg(theme.roles().background).fg(theme.roles().text_muted)
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// Non-RGB colors are returned unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |channel: u8| (f32::from(channel) * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Move an RGB color towards white by `amount` (0.0..=1.0).
pub fn lighten_rgb(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = amount.clamp(0.0, 1.0);
            let lift = |channel: u8| {
                let c = f32::from(channel);
                (c + (255.0 - c) * a).round().clamp(0.0, 255.0) as u8
            };
            Color::Rgb(lift(r), lift(g), lift(b))
        }
        other => other,
    }
}
