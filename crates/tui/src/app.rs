//! Application state for the grid viewer.
//!
//! `App` owns the [`DataTable`] and the surface-level state around it: the
//! theme, the open details pane and the last clicked row. Components receive
//! `&mut App`, mutate it, and report follow-up work as [`Effect`]s that the
//! runtime applies.

use std::sync::Arc;

use gallery_grid::{DataTable, DataTableOptions, GridConfig, SortOrder, resolve};
use gallery_types::Dataset;

use crate::ui::theme::Theme;

/// Side effects requested by components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,
    OpenDetails { display_index: usize, source_index: usize },
    CloseDetails,
}

/// A row clicked in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickedRow {
    pub display_index: usize,
    pub source_index: usize,
}

/// Label/value pairs of one row, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDetails {
    pub source_index: usize,
    pub entries: Vec<(String, String)>,
    pub offset: u16,
}

impl RowDetails {
    /// Scrolls by `delta` lines, keeping at least one entry in view.
    pub fn scroll_lines(&mut self, delta: i32) {
        let max = u16::try_from(self.entries.len().saturating_sub(1)).unwrap_or(u16::MAX);
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(max));
        self.offset = u16::try_from(next).unwrap_or(max);
    }
}

pub struct App {
    pub table: DataTable,
    pub theme: Box<dyn Theme>,
    pub details: Option<RowDetails>,
    pub last_clicked: Option<ClickedRow>,
    pub source_name: String,
}

impl App {
    pub fn new(dataset: Arc<Dataset>, config: GridConfig, options: DataTableOptions, theme: Box<dyn Theme>) -> Self {
        let mut table = DataTable::new(config);
        table.set_input(dataset, options);
        Self {
            table,
            theme,
            details: None,
            last_clicked: None,
            source_name: String::new(),
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Opens the details pane for a source row.
    pub fn open_details(&mut self, display_index: usize, source_index: usize) {
        self.last_clicked = Some(ClickedRow {
            display_index,
            source_index,
        });
        let dataset = Arc::clone(self.table.dataset());
        let Some(row) = dataset.row(source_index) else {
            return;
        };
        let separator = &self.table.config().multi_value_separator;
        let entries = dataset
            .headers
            .iter()
            .map(|header| {
                let cell = resolve(row, header, row.is_img(), separator);
                (header.value.clone(), cell.display_text(separator).into_owned())
            })
            .collect();
        self.details = Some(RowDetails {
            source_index,
            entries,
            offset: 0,
        });
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    pub fn apply(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::Quit => return false,
            Effect::OpenDetails {
                display_index,
                source_index,
            } => self.open_details(*display_index, *source_index),
            Effect::CloseDetails => self.close_details(),
        }
        true
    }

    /// Status line summary: row count, sort state, last click.
    pub fn status_text(&self) -> String {
        let mut parts = vec![format!("{} rows", self.table.row_count())];
        let state = self.table.sort_state();
        if let Some(column) = state.sorted_column
            && state.order != SortOrder::Original
            && let Some(header) = self.table.headers().get(column)
        {
            let direction = match state.order {
                SortOrder::Ascending => "ascending",
                _ => "descending",
            };
            parts.push(format!("sorted by {} ({direction})", header.value));
        }
        if let Some(clicked) = &self.last_clicked {
            parts.push(format!(
                "clicked row {} (source {})",
                clicked.display_index + 1,
                clicked.source_index + 1
            ));
        }
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::NordTheme;
    use gallery_grid::TableEvent;
    use gallery_types::{Header, Row};

    fn app() -> App {
        let dataset = Arc::new(Dataset::new(
            vec![Header::new("name", "Name"), Header::new("age", "Age")],
            vec![
                Row::new().with("name", "Bob").with("age", 30_i64),
                Row::new().with("name", "Al").with("age", 25_i64),
            ],
        ));
        App::new(
            dataset,
            GridConfig::default(),
            DataTableOptions::default(),
            Box::new(NordTheme::new()),
        )
    }

    #[test]
    fn details_list_header_labels_and_values() {
        let mut app = app();
        app.apply(&Effect::OpenDetails {
            display_index: 0,
            source_index: 1,
        });

        let details = app.details.as_ref().unwrap();
        assert_eq!(
            details.entries,
            vec![("Name".to_string(), "Al".to_string()), ("Age".to_string(), "25".to_string())]
        );
        assert!(app.status_text().contains("clicked row 1 (source 2)"));
    }

    #[test]
    fn status_reports_sort_direction() {
        let mut app = app();
        assert_eq!(app.status_text(), "2 rows");

        app.table.handle(TableEvent::HeaderClicked(1));
        assert_eq!(app.status_text(), "2 rows · sorted by Age (ascending)");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app();
        assert!(!app.apply(&Effect::Quit));
        assert!(app.apply(&Effect::CloseDetails));
    }
}
