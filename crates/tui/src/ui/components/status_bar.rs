//! Single-line summary under the grid.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct StatusBarComponent;

impl Component for StatusBarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let status = Paragraph::new(app.status_text()).style(th::status_bar_style(app.theme.as_ref()));
        frame.render_widget(status, rect);
    }
}
