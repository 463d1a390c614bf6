use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::components::{Component, DetailsComponent, GridComponent, StatusBarComponent};
use crate::app::{App, Effect};

/// Top-level view: grid, optional details pane, status line.
#[derive(Debug, Default)]
pub struct MainView {
    pub grid_view: GridComponent,
    pub details_view: DetailsComponent,
    pub status_view: StatusBarComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles global keys, then forwards to the details pane and the grid.
    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Esc if app.details.is_some() => return vec![Effect::CloseDetails],
            KeyCode::Esc => return vec![Effect::Quit],
            _ => {}
        }
        let mut effects = self.details_view.handle_key_events(app, key);
        effects.extend(self.grid_view.handle_key_events(app, key));
        effects
    }

    pub fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.details.is_some() && self.details_view.contains(mouse.column, mouse.row) {
            return self.details_view.handle_mouse_events(app, mouse);
        }
        self.grid_view.handle_mouse_events(app, mouse)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let [content, status] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        if app.details.is_some() {
            let [grid, details] =
                Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(content);
            self.grid_view.render(frame, grid, app);
            self.details_view.render(frame, details, app);
        } else {
            self.grid_view.render(frame, content, app);
        }
        self.status_view.render(frame, status, app);
    }
}
