//! Side pane listing every field of the last clicked row.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::{App, Effect};
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct DetailsComponent {
    area: Rect,
}

impl DetailsComponent {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position { x: column, y: row })
    }
}

impl Component for DetailsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(details) = app.details.as_mut() else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Char('j') => details.scroll_lines(1),
            KeyCode::Char('k') => details.scroll_lines(-1),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !self.contains(mouse.column, mouse.row) {
            return Vec::new();
        }
        if let Some(details) = app.details.as_mut() {
            match mouse.kind {
                MouseEventKind::ScrollDown => details.scroll_lines(1),
                MouseEventKind::ScrollUp => details.scroll_lines(-1),
                _ => {}
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        self.area = rect;
        let Some(details) = app.details.as_ref() else {
            return;
        };
        let theme = app.theme.as_ref();
        let title = format!("Row {}  [Esc] Close  [j/k] Scroll", details.source_index + 1);
        let block = th::block(theme, Some(title.as_str()), true);
        let lines: Vec<Line> = details
            .entries
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), th::table_header_style(theme)),
                    Span::styled(value.clone(), theme.text_primary_style()),
                ])
            })
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((details.offset, 0));
        frame.render_widget(paragraph, rect);
    }
}
