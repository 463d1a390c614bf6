use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use gallery_grid::{DataTable, TableEffect, TableEvent};
use ratatui::{Frame, layout::Rect};

use super::grid_view::{GridGeometry, render_grid};
use crate::app::{App, Effect};
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

/// Rows moved per wheel notch.
const WHEEL_ROWS: i64 = 3;
/// Cells moved per horizontal step.
const HORIZONTAL_CELLS: u64 = 8;

/// Interactive grid: sorting, hover, scrolling and row clicks.
#[derive(Debug, Default)]
pub struct GridComponent {
    geometry: GridGeometry,
}

impl GridComponent {
    fn dispatch(app: &mut App, event: TableEvent) -> Vec<Effect> {
        app.table
            .handle(event)
            .into_iter()
            .filter_map(|effect| match effect {
                TableEffect::RowClicked {
                    display_index,
                    source_index,
                } => Some(Effect::OpenDetails {
                    display_index,
                    source_index,
                }),
                TableEffect::Repaint => None,
            })
            .collect()
    }

    fn scroll_by(app: &mut App, dx: i64, dy: i64) -> Vec<Effect> {
        let viewport = app.table.viewport();
        let left = offset(viewport.scroll_left(), dx);
        let top = offset(viewport.scroll_top(), dy);
        Self::dispatch(app, TableEvent::Scrolled { left, top })
    }

    fn horizontal_step(&self, table: &DataTable) -> i64 {
        i64::try_from(HORIZONTAL_CELLS * u64::from(table.config().px_per_char)).unwrap_or(i64::MAX)
    }

    fn page_height(&self, table: &DataTable) -> i64 {
        let viewport = table.viewport();
        let page = viewport.body_height().max(viewport.row_height());
        i64::try_from(page).unwrap_or(i64::MAX)
    }

    /// Clicks the header of the n-th visible column.
    fn click_visible_header(app: &mut App, ordinal: usize) -> Vec<Effect> {
        let column = (0..app.table.headers().len())
            .filter(|&col| app.table.layout().is_visible(col))
            .nth(ordinal);
        match column {
            Some(column) => Self::dispatch(app, TableEvent::HeaderClicked(column)),
            None => Vec::new(),
        }
    }
}

fn offset(current: u64, delta: i64) -> u64 {
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs())
    }
}

impl Component for GridComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let row = i64::try_from(app.table.viewport().row_height()).unwrap_or(i64::MAX);
        let step = self.horizontal_step(&app.table);
        match key.code {
            KeyCode::Down => Self::scroll_by(app, 0, row),
            KeyCode::Up => Self::scroll_by(app, 0, -row),
            KeyCode::Right => Self::scroll_by(app, step, 0),
            KeyCode::Left => Self::scroll_by(app, -step, 0),
            KeyCode::PageDown => {
                let page = self.page_height(&app.table);
                Self::scroll_by(app, 0, page)
            }
            KeyCode::PageUp => {
                let page = self.page_height(&app.table);
                Self::scroll_by(app, 0, -page)
            }
            KeyCode::Home => {
                let left = if key.modifiers.contains(KeyModifiers::SHIFT) {
                    0
                } else {
                    app.table.viewport().scroll_left()
                };
                Self::dispatch(app, TableEvent::Scrolled { left, top: 0 })
            }
            KeyCode::End => {
                let viewport = app.table.viewport();
                let (left, top) = (viewport.scroll_left(), viewport.max_scroll_top());
                Self::dispatch(app, TableEvent::Scrolled { left, top })
            }
            KeyCode::Char(c @ '1'..='9') => {
                let ordinal = usize::from(c as u8 - b'1');
                Self::click_visible_header(app, ordinal)
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let geometry = self.geometry;
        let row = i64::try_from(geometry.row_height).unwrap_or(i64::MAX);
        let step = self.horizontal_step(&app.table);
        match mouse.kind {
            MouseEventKind::Moved => match geometry.body_point_px(mouse.column, mouse.row) {
                Some((x, y)) => match app.table.hit_test(x, y) {
                    Some((row, column)) => Self::dispatch(app, TableEvent::PointerEntered { row, column }),
                    None => Self::dispatch(app, TableEvent::PointerLeft),
                },
                None => Self::dispatch(app, TableEvent::PointerLeft),
            },
            MouseEventKind::Down(MouseButton::Left) => {
                if geometry.in_header(mouse.column, mouse.row) {
                    let column = geometry
                        .x_px(mouse.column)
                        .and_then(|x| app.table.header_hit_test(x));
                    return match column {
                        Some(column) => Self::dispatch(app, TableEvent::HeaderClicked(column)),
                        None => Vec::new(),
                    };
                }
                let hit = geometry
                    .body_point_px(mouse.column, mouse.row)
                    .and_then(|(x, y)| app.table.hit_test(x, y));
                match hit {
                    Some((display_index, _)) => Self::dispatch(app, TableEvent::BodyClicked { display_index }),
                    None => Vec::new(),
                }
            }
            MouseEventKind::ScrollDown if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
                Self::scroll_by(app, step, 0)
            }
            MouseEventKind::ScrollUp if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
                Self::scroll_by(app, -step, 0)
            }
            MouseEventKind::ScrollDown => Self::scroll_by(app, 0, row.saturating_mul(WHEEL_ROWS)),
            MouseEventKind::ScrollUp => Self::scroll_by(app, 0, row.saturating_mul(WHEEL_ROWS).saturating_neg()),
            MouseEventKind::ScrollRight => Self::scroll_by(app, step, 0),
            MouseEventKind::ScrollLeft => Self::scroll_by(app, -step, 0),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let title = if app.source_name.is_empty() {
            "Grid  [1-9] Sort  [q] Quit".to_string()
        } else {
            format!("{}  [1-9] Sort  [q] Quit", app.source_name)
        };
        let block = th::block(app.theme.as_ref(), Some(title.as_str()), app.details.is_none());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.geometry = render_grid(frame, inner, app);
    }
}
