//! Header and body regions that scroll horizontally in lockstep.
//!
//! The coordinator owns three windows: the header's columns, the body's
//! columns and the body's rows. Both column windows are fed the same widths
//! and the same `scroll_left`, so a header cell always sits above the body
//! cells of its column. The header never scrolls vertically.

use serde::Serialize;
use tracing::debug;

use crate::cell::RenderableCell;
use crate::config::GridConfig;
use crate::layout::ColumnLayout;
use crate::window::{FixedSizeWindow, VariableSizeWindow, VirtualizedWindow};

/// The single hovered body cell, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HoverState {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSlot {
    pub column: usize,
    /// Content offset; subtract `GridFrame::scroll_left` for screen position.
    pub x: u64,
    pub width: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySlot {
    /// Index into the current display order.
    pub row: usize,
    pub column: usize,
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
    /// Set on every cell of the hovered row.
    pub hovered: bool,
    pub cell: RenderableCell,
}

/// Everything a renderer needs to draw the visible window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridFrame {
    pub header: Vec<HeaderSlot>,
    pub body: Vec<BodySlot>,
    pub scroll_left: u64,
    pub scroll_top: u64,
    pub header_height: u64,
    pub body_height: u64,
    pub content_width: u64,
    pub content_height: u64,
}

impl GridFrame {
    /// Body slots of one display row, left to right.
    pub fn row_slots(&self, row: usize) -> impl Iterator<Item = &BodySlot> {
        self.body.iter().filter(move |slot| slot.row == row)
    }

    pub fn visible_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.body.iter().map(|slot| slot.row).collect();
        rows.dedup();
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StructureKey {
    widths: Vec<u32>,
    row_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameKey {
    generation: u64,
    scroll_left: u64,
    scroll_top: u64,
    viewport_width: u64,
}

#[derive(Debug)]
pub struct VirtualizationCoordinator {
    header_columns: VariableSizeWindow,
    body_columns: VariableSizeWindow,
    body_rows: FixedSizeWindow,
    row_height: u64,
    max_body_height: u64,
    structure: Option<StructureKey>,
    scroll_left: u64,
    scroll_top: u64,
    viewport_width: u64,
    hover: Option<HoverState>,
    generation: u64,
    recomputes: usize,
    frames_built: usize,
    frame_key: Option<FrameKey>,
    frame: GridFrame,
}

impl VirtualizationCoordinator {
    pub fn new(config: &GridConfig) -> Self {
        let row_height = u64::from(config.row_min_height);
        Self {
            header_columns: VariableSizeWindow::new(Vec::new(), config.overscan),
            body_columns: VariableSizeWindow::new(Vec::new(), config.overscan),
            body_rows: FixedSizeWindow::new(0, row_height, config.overscan),
            row_height,
            max_body_height: u64::from(config.table_max_height),
            structure: None,
            scroll_left: 0,
            scroll_top: 0,
            viewport_width: u64::from(config.default_width),
            hover: None,
            generation: 0,
            recomputes: 0,
            frames_built: 0,
            frame_key: None,
            frame: GridFrame::default(),
        }
    }

    // Selectors

    pub fn scroll_left(&self) -> u64 {
        self.scroll_left
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn hover(&self) -> Option<HoverState> {
        self.hover
    }

    pub fn row_height(&self) -> u64 {
        self.row_height
    }

    pub fn header_height(&self) -> u64 {
        self.row_height
    }

    pub fn row_count(&self) -> usize {
        self.body_rows.item_count()
    }

    pub fn body_height(&self) -> u64 {
        self.body_rows.total_size().min(self.max_body_height)
    }

    pub fn content_width(&self) -> u64 {
        self.body_columns.total_size()
    }

    pub fn column_width(&self, column: usize) -> u64 {
        self.body_columns.item_size(column)
    }

    pub fn viewport_width(&self) -> u64 {
        self.viewport_width
    }

    /// Number of times cached extents were rebuilt.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    /// Number of frames assembled rather than served from the memo.
    pub fn frames_built(&self) -> usize {
        self.frames_built
    }

    pub fn max_scroll_left(&self) -> u64 {
        self.body_columns.max_scroll(self.viewport_width)
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.body_rows.max_scroll(self.body_height())
    }

    // Reducers

    /// Re-measures both regions when column widths or row count differ from
    /// the last sync. Returns whether a recompute happened.
    pub fn sync(&mut self, layout: &ColumnLayout, row_count: usize) -> bool {
        let key = StructureKey {
            widths: layout.widths_in_order(),
            row_count,
        };
        if self.structure.as_ref() == Some(&key) {
            return false;
        }
        let sizes: Vec<u64> = key.widths.iter().map(|width| u64::from(*width)).collect();
        self.header_columns.set_sizes(sizes.clone());
        self.body_columns.set_sizes(sizes);
        self.body_rows.resize(row_count, self.row_height);
        self.force_recompute();
        debug!(
            columns = key.widths.len(),
            rows = row_count,
            content_width = self.content_width(),
            "virtualized regions re-measured"
        );
        self.structure = Some(key);
        true
    }

    /// Rebuilds every cached extent and invalidates the memoized frame.
    pub fn force_recompute(&mut self) {
        self.header_columns.force_recompute();
        self.body_columns.force_recompute();
        self.body_rows.force_recompute();
        self.recomputes += 1;
        self.clamp_scroll();
        self.invalidate();
    }

    /// Marks the next paint as stale without re-measuring.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn set_viewport_width(&mut self, width: u64) {
        if self.viewport_width != width {
            self.viewport_width = width;
            self.clamp_scroll();
        }
    }

    /// Caps the body region's height, e.g. to the space a surface can give it.
    pub fn set_max_body_height(&mut self, height: u64) {
        if self.max_body_height != height {
            self.max_body_height = height;
            self.clamp_scroll();
            self.invalidate();
        }
    }

    /// Moves the body; the header follows horizontally.
    pub fn scroll(&mut self, left: u64, top: u64) {
        self.scroll_left = left;
        self.scroll_top = top;
        self.clamp_scroll();
    }

    /// Horizontal scroll originating in the header; vertical offset is kept.
    pub fn scroll_header(&mut self, left: u64) {
        self.scroll_left = left;
        self.clamp_scroll();
    }

    pub fn pointer_enter(&mut self, row: usize, column: usize) {
        let next = Some(HoverState { row, column });
        if self.hover != next {
            self.hover = next;
            self.invalidate();
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.hover.take().is_some() {
            self.invalidate();
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_left = self.scroll_left.min(self.max_scroll_left());
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    // Hit testing

    /// Maps a point relative to the body's top-left corner to the
    /// `(display row, column)` under it. Empty columns are never hit.
    pub fn hit_test(&self, x: u64, y: u64) -> Option<(usize, usize)> {
        if x >= self.viewport_width || y >= self.body_height() {
            return None;
        }
        let column = self.body_columns.item_at(self.scroll_left.saturating_add(x))?;
        let row = self.body_rows.item_at(self.scroll_top.saturating_add(y))?;
        Some((row, column))
    }

    /// Maps a point relative to the header's left edge to a column.
    pub fn header_hit_test(&self, x: u64) -> Option<usize> {
        if x >= self.viewport_width {
            return None;
        }
        self.header_columns.item_at(self.scroll_left.saturating_add(x))
    }

    // Painting

    /// Builds the frame for the visible window, resolving only visible cells.
    ///
    /// Frames are memoized on paint generation, scroll offsets and viewport
    /// width; `resolve` is not called when the memo is still valid.
    pub fn paint<F>(&mut self, viewport_width: u64, mut resolve: F) -> &GridFrame
    where
        F: FnMut(usize, usize) -> RenderableCell,
    {
        self.set_viewport_width(viewport_width);
        let key = FrameKey {
            generation: self.generation,
            scroll_left: self.scroll_left,
            scroll_top: self.scroll_top,
            viewport_width,
        };
        if self.frame_key != Some(key) {
            self.frame = self.build_frame(&mut resolve);
            self.frame_key = Some(key);
            self.frames_built += 1;
        }
        &self.frame
    }

    fn build_frame(&self, resolve: &mut dyn FnMut(usize, usize) -> RenderableCell) -> GridFrame {
        let body_height = self.body_height();
        let header = self
            .header_columns
            .visible_items(self.scroll_left, self.viewport_width)
            .into_iter()
            .map(|column| HeaderSlot {
                column,
                x: self.header_columns.item_offset(column),
                width: self.header_columns.item_size(column),
            })
            .collect();

        let columns = self.body_columns.visible_items(self.scroll_left, self.viewport_width);
        let rows = self.body_rows.visible_range(self.scroll_top, body_height);
        let mut body = Vec::with_capacity(rows.len() * columns.len());
        for row in rows {
            let y = self.body_rows.item_offset(row);
            for column in &columns {
                let column = *column;
                body.push(BodySlot {
                    row,
                    column,
                    x: self.body_columns.item_offset(column),
                    y,
                    width: self.body_columns.item_size(column),
                    height: self.row_height,
                    hovered: self.hover.is_some_and(|hover| hover.row == row),
                    cell: resolve(row, column),
                });
            }
        }

        GridFrame {
            header,
            body,
            scroll_left: self.scroll_left,
            scroll_top: self.scroll_top,
            header_height: self.row_height,
            body_height,
            content_width: self.body_columns.total_size(),
            content_height: self.body_rows.total_size(),
        }
    }
}
