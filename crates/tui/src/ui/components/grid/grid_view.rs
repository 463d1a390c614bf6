//! Draws a [`GridFrame`] into a terminal buffer.
//!
//! The grid works in pixels; the terminal in cells. One cell is
//! `px_per_char` pixels wide and one terminal row is `row_min_height` pixels
//! tall, so a pixel offset maps to cell `ceil(offset / cell_size)`. The same
//! rule is used when mapping mouse positions back to pixels, which keeps
//! clicks on a column's first visible cell inside that column.

use gallery_grid::{GridFrame, RenderableCell, SortOrder};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::ui::theme::{roles::Theme, theme_helpers as th};

pub const EMPTY_PLACEHOLDER: &str = "No data";

/// Screen areas of the last rendered grid plus the pixel scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridGeometry {
    pub header_area: Rect,
    pub body_area: Rect,
    pub scrollbar_area: Rect,
    pub cell_width: u64,
    pub row_height: u64,
}

impl GridGeometry {
    pub fn new(area: Rect, cell_width: u64, row_height: u64) -> Self {
        let (table_area, scrollbar_area) = split_table_and_scrollbar_area(area);
        let header_area = Rect {
            height: table_area.height.min(1),
            ..table_area
        };
        let body_area = Rect {
            y: table_area.y.saturating_add(header_area.height),
            height: table_area.height.saturating_sub(header_area.height),
            ..table_area
        };
        Self {
            header_area,
            body_area,
            scrollbar_area: Rect {
                y: body_area.y,
                height: body_area.height,
                ..scrollbar_area
            },
            cell_width: cell_width.max(1),
            row_height: row_height.max(1),
        }
    }

    pub fn viewport_width_px(&self) -> u64 {
        u64::from(self.body_area.width) * self.cell_width
    }

    pub fn body_height_px(&self) -> u64 {
        u64::from(self.body_area.height) * self.row_height
    }

    /// Pixel x of a terminal column inside the header or body.
    pub fn x_px(&self, column: u16) -> Option<u64> {
        let offset = column.checked_sub(self.body_area.x)?;
        (offset < self.body_area.width).then(|| u64::from(offset) * self.cell_width)
    }

    /// Body-relative pixel position of a terminal cell.
    pub fn body_point_px(&self, column: u16, row: u16) -> Option<(u64, u64)> {
        if !self.body_area.contains(Position { x: column, y: row }) {
            return None;
        }
        let x = self.x_px(column)?;
        let y = u64::from(row - self.body_area.y) * self.row_height;
        Some((x, y))
    }

    pub fn in_header(&self, column: u16, row: u16) -> bool {
        self.header_area.contains(Position { x: column, y: row })
    }
}

/// Cells covered by one column on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellSpan {
    start: u16,
    width: u16,
    /// Cells of the column hidden off the left edge.
    skip: usize,
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1).div_euclid(divisor)
}

fn column_span(x: u64, width: u64, scroll_left: u64, cell_width: u64, cells: u16) -> Option<CellSpan> {
    let unit = i64::try_from(cell_width).ok()?;
    let start = i64::try_from(x).ok()? - i64::try_from(scroll_left).ok()?;
    let end = start + i64::try_from(width).ok()?;
    let natural_start = ceil_div(start, unit);
    let first = natural_start.max(0);
    let last = ceil_div(end, unit).min(i64::from(cells));
    if first >= last {
        return None;
    }
    Some(CellSpan {
        start: u16::try_from(first).ok()?,
        width: u16::try_from(last - first).ok()?,
        skip: usize::try_from(first - natural_start).ok()?,
    })
}

/// Terminal row offset of a body row at pixel `y`, if it is on screen.
fn row_offset(y: u64, scroll_top: u64, row_height: u64, rows: u16) -> Option<u16> {
    let unit = i64::try_from(row_height).ok()?;
    let relative = i64::try_from(y).ok()? - i64::try_from(scroll_top).ok()?;
    let offset = ceil_div(relative, unit);
    (0..i64::from(rows)).contains(&offset).then(|| u16::try_from(offset).ok()).flatten()
}

/// Drops `skip` display cells, then keeps at most `max` cells.
pub fn clip_text(text: &str, skip: usize, max: usize) -> String {
    let mut skipped = 0;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if skipped < skip {
            skipped += width;
            continue;
        }
        if used + width > max {
            break;
        }
        used += width;
        out.push(ch);
    }
    out
}

/// Header label with the sort arrow for the sorted column.
pub fn header_label(label: &str, indicator: Option<SortOrder>) -> String {
    match indicator {
        Some(SortOrder::Ascending) => format!("{label} ▲"),
        Some(SortOrder::Descending) => format!("{label} ▼"),
        _ => label.to_string(),
    }
}

fn cell_style(cell: &RenderableCell, row_style: Style, theme: &dyn Theme) -> Style {
    if cell.is_image() {
        row_style.patch(th::image_cell_style(theme))
    } else {
        row_style
    }
}

/// Renders the grid into `area` and returns the geometry used.
pub fn render_grid(frame: &mut Frame, area: Rect, app: &mut App) -> GridGeometry {
    let config = app.table.config();
    let geometry = GridGeometry::new(area, u64::from(config.px_per_char), u64::from(config.row_min_height));
    let separator = config.multi_value_separator.clone();
    let theme: &dyn Theme = app.theme.as_ref();

    if app.table.is_empty() {
        render_empty_placeholder(frame, area, theme);
        return geometry;
    }

    app.table.set_max_body_height(geometry.body_height_px());
    let grid_frame: GridFrame = app.table.paint(geometry.viewport_width_px()).clone();
    let buffer = frame.buffer_mut();

    let header_area = geometry.header_area;
    buffer.set_style(header_area, th::table_header_row_style(theme));
    for slot in &grid_frame.header {
        let Some(span) = column_span(
            slot.x,
            slot.width,
            grid_frame.scroll_left,
            geometry.cell_width,
            header_area.width,
        ) else {
            continue;
        };
        let indicator = app.table.header_sort_indicator(slot.column);
        let label = app
            .table
            .headers()
            .get(slot.column)
            .map(|header| header_label(&header.value, indicator))
            .unwrap_or_default();
        let style = if indicator.is_some() {
            th::table_header_style(theme).patch(theme.accent_emphasis_style())
        } else {
            th::table_header_style(theme)
        };
        let text = clip_text(&label, span.skip, usize::from(span.width.saturating_sub(1)));
        buffer.set_string(header_area.x + span.start, header_area.y, text, style);
    }

    let body_area = geometry.body_area;
    for display_row in grid_frame.visible_rows() {
        let Some(y_offset) = grid_frame
            .row_slots(display_row)
            .next()
            .and_then(|slot| row_offset(slot.y, grid_frame.scroll_top, geometry.row_height, body_area.height))
        else {
            continue;
        };
        let hovered = grid_frame.row_slots(display_row).any(|slot| slot.hovered);
        let row_style = if hovered {
            th::table_hover_style(theme)
        } else {
            th::table_row_style(theme, display_row)
        };
        let y = body_area.y + y_offset;
        buffer.set_style(Rect::new(body_area.x, y, body_area.width, 1), row_style);

        for slot in grid_frame.row_slots(display_row) {
            let Some(span) = column_span(
                slot.x,
                slot.width,
                grid_frame.scroll_left,
                geometry.cell_width,
                body_area.width,
            ) else {
                continue;
            };
            let text = slot.cell.display_text(&separator);
            let text = clip_text(&text, span.skip, usize::from(span.width.saturating_sub(1)));
            buffer.set_string(body_area.x + span.start, y, text, cell_style(&slot.cell, row_style, theme));
        }
    }

    render_scrollbar(frame, geometry, &grid_frame, theme);
    geometry
}

fn render_empty_placeholder(frame: &mut Frame, area: Rect, theme: &dyn Theme) {
    let placeholder = Paragraph::new(EMPTY_PLACEHOLDER).style(theme.text_muted_style());
    frame.render_widget(placeholder, area);
}

fn split_table_and_scrollbar_area(area: Rect) -> (Rect, Rect) {
    if area.width <= 1 {
        return (area, area);
    }
    let table_area = Rect {
        width: area.width - 1,
        ..area
    };
    let scrollbar_area = Rect {
        x: area.x + area.width - 1,
        width: 1,
        ..area
    };
    (table_area, scrollbar_area)
}

fn render_scrollbar(frame: &mut Frame, geometry: GridGeometry, grid_frame: &GridFrame, theme: &dyn Theme) {
    if grid_frame.content_height <= grid_frame.body_height || geometry.scrollbar_area.width == 0 {
        return;
    }
    let rows = usize::try_from(grid_frame.content_height / geometry.row_height).unwrap_or(usize::MAX);
    let visible = usize::try_from(grid_frame.body_height / geometry.row_height)
        .unwrap_or(1)
        .max(1);
    let position = usize::try_from(grid_frame.scroll_top / geometry.row_height).unwrap_or(0);
    let max_offset = rows.saturating_sub(visible);
    let mut state = ScrollbarState::new(max_offset)
        .position(position.min(max_offset))
        .viewport_content_length(visible);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(Style::default().fg(theme.roles().scrollbar_thumb))
        .track_style(Style::default().fg(theme.roles().scrollbar_track));
    frame.render_stateful_widget(scrollbar, geometry.scrollbar_area, &mut state);
}
