//! The data table: owns derived layout, sort and hover state for a shared
//! dataset and reduces user events into state changes and effects.

use std::fmt;
use std::sync::Arc;

use gallery_types::{Dataset, Header, Row};
use tracing::{debug, trace};

use crate::cell::{RenderableCell, resolve};
use crate::config::GridConfig;
use crate::layout::{ColumnLayout, estimate};
use crate::sort::{SortOrder, SortState, advance};
use crate::viewport::{GridFrame, HoverState, VirtualizationCoordinator};

/// Invoked with the display index and row of a clicked body cell.
pub type RowClickCallback = Box<dyn FnMut(usize, &Row)>;

/// Per-input options. Unset values fall back to the table's [`GridConfig`].
#[derive(Default)]
pub struct DataTableOptions {
    pub width: Option<u32>,
    pub exclude_empty_columns: Option<bool>,
    pub on_row_click: Option<RowClickCallback>,
}

impl DataTableOptions {
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_exclude_empty_columns(mut self, exclude: bool) -> Self {
        self.exclude_empty_columns = Some(exclude);
        self
    }

    pub fn on_row_click(mut self, callback: impl FnMut(usize, &Row) + 'static) -> Self {
        self.on_row_click = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DataTableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTableOptions")
            .field("width", &self.width)
            .field("exclude_empty_columns", &self.exclude_empty_columns)
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    HeaderClicked(usize),
    BodyClicked { display_index: usize },
    PointerEntered { row: usize, column: usize },
    PointerLeft,
    Scrolled { left: u64, top: u64 },
    HeaderScrolled { left: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEffect {
    Repaint,
    RowClicked { display_index: usize, source_index: usize },
}

pub struct DataTable {
    config: GridConfig,
    dataset: Arc<Dataset>,
    width: u32,
    exclude_empty_columns: bool,
    initialized: bool,
    layout: ColumnLayout,
    sort_state: SortState,
    display_order: Vec<usize>,
    coordinator: VirtualizationCoordinator,
    on_row_click: Option<RowClickCallback>,
    recomputes: usize,
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.dataset.row_count())
            .field("width", &self.width)
            .field("layout", &self.layout)
            .field("sort_state", &self.sort_state)
            .field("recomputes", &self.recomputes)
            .finish_non_exhaustive()
    }
}

impl DataTable {
    pub fn new(config: GridConfig) -> Self {
        let coordinator = VirtualizationCoordinator::new(&config);
        Self {
            width: config.default_width,
            exclude_empty_columns: config.exclude_empty_columns,
            config,
            dataset: Arc::new(Dataset::default()),
            initialized: false,
            layout: ColumnLayout::default(),
            sort_state: SortState::default(),
            display_order: Vec::new(),
            coordinator,
            on_row_click: None,
            recomputes: 0,
        }
    }

    /// Supplies the table's input.
    ///
    /// Derived state is rebuilt only when the dataset differs structurally
    /// from the previous one, or when the width or empty-column flag change.
    /// Returns whether a rebuild happened.
    pub fn set_input(&mut self, dataset: Arc<Dataset>, options: DataTableOptions) -> bool {
        let width = options.width.unwrap_or(self.config.default_width);
        let exclude = options
            .exclude_empty_columns
            .unwrap_or(self.config.exclude_empty_columns);
        self.on_row_click = options.on_row_click;

        let same_options = self.initialized && self.width == width && self.exclude_empty_columns == exclude;
        if same_options && Arc::ptr_eq(&self.dataset, &dataset) {
            return false;
        }
        if same_options && *self.dataset == *dataset {
            trace!("structurally equal dataset; keeping derived state");
            self.dataset = dataset;
            return false;
        }

        self.dataset = dataset;
        self.width = width;
        self.exclude_empty_columns = exclude;
        self.initialized = true;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let config = GridConfig {
            exclude_empty_columns: self.exclude_empty_columns,
            ..self.config.clone()
        };
        self.layout = estimate(&self.dataset.headers, &self.dataset.rows, self.width, &config);
        self.sort_state = SortState::default();
        self.coordinator.pointer_leave();
        self.display_order = (0..self.dataset.row_count()).collect();
        self.coordinator.sync(&self.layout, self.dataset.row_count());
        // Same shape with different content still needs a fresh frame.
        self.coordinator.invalidate();
        self.recomputes += 1;
        debug!(
            columns = self.layout.column_count(),
            visible_columns = self.layout.visible_column_count(),
            rows = self.dataset.row_count(),
            width = self.width,
            stretched = self.layout.last_column_stretched,
            "column layout recomputed"
        );
    }

    // Selectors

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn headers(&self) -> &[Header] {
        &self.dataset.headers
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    pub fn display_order(&self) -> &[usize] {
        &self.display_order
    }

    pub fn source_index(&self, display_index: usize) -> Option<usize> {
        self.display_order.get(display_index).copied()
    }

    pub fn display_row(&self, display_index: usize) -> Option<&Row> {
        self.source_index(display_index)
            .and_then(|source| self.dataset.row(source))
    }

    pub fn hover(&self) -> Option<HoverState> {
        self.coordinator.hover()
    }

    pub fn row_count(&self) -> usize {
        self.dataset.row_count()
    }

    /// True when there are no rows; renderers show a placeholder instead.
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Direction arrow to show on a header, if it is the sorted column.
    pub fn header_sort_indicator(&self, column: usize) -> Option<SortOrder> {
        match self.sort_state.order_for(column) {
            SortOrder::Original => None,
            order => Some(order),
        }
    }

    pub fn cell(&self, display_index: usize, column: usize) -> RenderableCell {
        resolve_display(
            &self.dataset,
            &self.display_order,
            display_index,
            column,
            &self.config.multi_value_separator,
        )
    }

    pub fn viewport(&self) -> &VirtualizationCoordinator {
        &self.coordinator
    }

    /// Number of layout rebuilds since construction.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    pub fn hit_test(&self, x: u64, y: u64) -> Option<(usize, usize)> {
        self.coordinator.hit_test(x, y)
    }

    pub fn header_hit_test(&self, x: u64) -> Option<usize> {
        self.coordinator.header_hit_test(x)
    }

    pub fn set_max_body_height(&mut self, height: u64) {
        self.coordinator.set_max_body_height(height);
    }

    pub fn paint(&mut self, viewport_width: u64) -> &GridFrame {
        let dataset = &self.dataset;
        let order = &self.display_order;
        let separator = &self.config.multi_value_separator;
        self.coordinator.paint(viewport_width, |row, column| {
            resolve_display(dataset, order, row, column, separator)
        })
    }

    // Reducers

    pub fn handle(&mut self, event: TableEvent) -> Vec<TableEffect> {
        match event {
            TableEvent::HeaderClicked(column) => self.sort_by(column),
            TableEvent::BodyClicked { display_index } => self.click_row(display_index),
            TableEvent::PointerEntered { row, column } => {
                if row >= self.row_count() || !self.layout.is_visible(column) {
                    return Vec::new();
                }
                let before = self.coordinator.hover();
                self.coordinator.pointer_enter(row, column);
                repaint_if(before != self.coordinator.hover())
            }
            TableEvent::PointerLeft => {
                let before = self.coordinator.hover();
                self.coordinator.pointer_leave();
                repaint_if(before.is_some())
            }
            TableEvent::Scrolled { left, top } => {
                let before = (self.coordinator.scroll_left(), self.coordinator.scroll_top());
                self.coordinator.scroll(left, top);
                repaint_if(before != (self.coordinator.scroll_left(), self.coordinator.scroll_top()))
            }
            TableEvent::HeaderScrolled { left } => {
                let before = self.coordinator.scroll_left();
                self.coordinator.scroll_header(left);
                repaint_if(before != self.coordinator.scroll_left())
            }
        }
    }

    fn sort_by(&mut self, column: usize) -> Vec<TableEffect> {
        if !self.layout.is_visible(column) {
            trace!(column, "ignoring click on empty or unknown column");
            return Vec::new();
        }
        let Some(header) = self.dataset.header(column) else {
            return Vec::new();
        };
        let rows = &self.dataset.rows;
        let separator = &self.config.multi_value_separator;
        let outcome = advance(
            column,
            rows.len(),
            &self.display_order,
            self.sort_state,
            |source, _| resolve(&rows[source], header, rows[source].is_img(), separator),
        );
        self.display_order = outcome.order;
        self.sort_state = outcome.state;
        self.coordinator.invalidate();
        vec![TableEffect::Repaint]
    }

    fn click_row(&mut self, display_index: usize) -> Vec<TableEffect> {
        let Some(source_index) = self.source_index(display_index) else {
            return Vec::new();
        };
        if let Some(callback) = self.on_row_click.as_mut()
            && let Some(row) = self.dataset.row(source_index)
        {
            callback(display_index, row);
        }
        vec![TableEffect::RowClicked {
            display_index,
            source_index,
        }]
    }
}

fn repaint_if(changed: bool) -> Vec<TableEffect> {
    if changed { vec![TableEffect::Repaint] } else { Vec::new() }
}

fn resolve_display(
    dataset: &Dataset,
    order: &[usize],
    display_index: usize,
    column: usize,
    separator: &str,
) -> RenderableCell {
    let row = order.get(display_index).and_then(|source| dataset.row(*source));
    match (row, dataset.header(column)) {
        (Some(row), Some(header)) => resolve(row, header, row.is_img(), separator),
        _ => RenderableCell::empty(),
    }
}
