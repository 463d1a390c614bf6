//! Headless engine for a virtualized, sortable data grid.
//!
//! [`DataTable`] is the entry point: give it an `Arc<Dataset>` and it derives
//! column widths ([`layout`]), keeps a sortable display order ([`sort`]),
//! and paints only the visible window of cells ([`viewport`], [`window`]).
//! Surfaces feed it [`TableEvent`]s and act on the returned [`TableEffect`]s.

pub mod cell;
pub mod config;
pub mod layout;
pub mod sort;
pub mod table;
pub mod viewport;
pub mod window;

pub use cell::{ImageToken, RenderableCell, resolve};
pub use config::{GridConfig, GridError};
pub use layout::{ColumnLayout, estimate};
pub use sort::{SortOrder, SortOutcome, SortState, advance, compare_cells};
pub use table::{DataTable, DataTableOptions, RowClickCallback, TableEffect, TableEvent};
pub use viewport::{BodySlot, GridFrame, HeaderSlot, HoverState, VirtualizationCoordinator};
pub use window::{FixedSizeWindow, VariableSizeWindow, VirtualizedWindow};
