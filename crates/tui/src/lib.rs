//! # Gallery TUI
//!
//! Terminal front end for the virtualized data grid. The grid itself lives in
//! `gallery-grid`; this crate maps its pixel layout onto terminal cells,
//! turns mouse and key input into table events, and shows the clicked row in
//! a details pane.
//!
//! One terminal cell stands for `px_per_char` pixels horizontally and one
//! `row_min_height` row vertically, so column widths computed in pixels are
//! drawn at their natural proportions.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use gallery_grid::DataTableOptions;
use gallery_types::Dataset;
use gallery_util::UserSettings;
use tracing::info;

/// Runs the interactive viewer until the user quits.
///
/// The grid configuration and theme come from `settings`; `GALLERY_THEME`
/// overrides the saved theme.
///
/// # Errors
///
/// Returns an error when the terminal cannot be set up or restored, or when
/// drawing fails.
pub async fn run(dataset: Arc<Dataset>, settings: &UserSettings, options: DataTableOptions, source_name: &str) -> Result<()> {
    let theme = ui::theme::load(settings.preferred_theme().as_deref());
    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        source = source_name,
        "starting grid viewer"
    );
    let app = app::App::new(dataset, settings.grid(), options, theme).with_source_name(source_name);
    ui::runtime::run_app(app).await
}
