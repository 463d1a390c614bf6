//! Sizing constants and behavior switches for the grid.
//!
//! Every value has a default matching the grid's nominal pixel layout, so a
//! partially-specified settings file deserializes into a usable config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TABLE_WIDTH: u32 = 980;
pub const ROW_MIN_HEIGHT: u32 = 50;
pub const COLUMN_MIN_WIDTH: u32 = 100;
pub const COLUMN_MAX_WIDTH: u32 = 400;
pub const TABLE_MAX_HEIGHT: u32 = 600;
pub const PX_PER_CHAR: u32 = 12;
pub const DEFAULT_OVERSCAN: usize = 4;
pub const MULTI_VALUE_SEPARATOR: &str = " ; ";

/// Error surfaced when a config cannot drive a layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid config: {field} must be greater than zero")]
    ZeroDimension { field: &'static str },

    #[error("invalid grid config: column_min_width ({min}) exceeds column_max_width ({max})")]
    ColumnBounds { min: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Nominal rendering width in pixels used when the caller supplies none.
    pub default_width: u32,
    /// Suppress columns whose every cell is empty.
    pub exclude_empty_columns: bool,
    pub row_min_height: u32,
    pub column_min_width: u32,
    pub column_max_width: u32,
    pub table_max_height: u32,
    /// Character-to-pixel conversion for width estimation.
    pub px_per_char: u32,
    /// Extra rows/columns painted beyond each edge of the viewport.
    pub overscan: usize,
    pub multi_value_separator: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_TABLE_WIDTH,
            exclude_empty_columns: true,
            row_min_height: ROW_MIN_HEIGHT,
            column_min_width: COLUMN_MIN_WIDTH,
            column_max_width: COLUMN_MAX_WIDTH,
            table_max_height: TABLE_MAX_HEIGHT,
            px_per_char: PX_PER_CHAR,
            overscan: DEFAULT_OVERSCAN,
            multi_value_separator: MULTI_VALUE_SEPARATOR.to_string(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.px_per_char == 0 {
            return Err(GridError::ZeroDimension { field: "px_per_char" });
        }
        if self.row_min_height == 0 {
            return Err(GridError::ZeroDimension { field: "row_min_height" });
        }
        if self.column_min_width > self.column_max_width {
            return Err(GridError::ColumnBounds {
                min: self.column_min_width,
                max: self.column_max_width,
            });
        }
        Ok(())
    }

    /// Body height for `row_count` rows, capped at `table_max_height`.
    pub fn body_height(&self, row_count: usize) -> u32 {
        let rows = u32::try_from(row_count).unwrap_or(u32::MAX);
        rows.saturating_mul(self.row_min_height).min(self.table_max_height)
    }
}
