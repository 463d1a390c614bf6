//! Shared data model for the Gallery data grid.
//!
//! The grid consumes an ordered sequence of [`Header`]s and an ordered
//! sequence of [`Row`]s. Rows are semi-structured: every field is either a
//! single [`Scalar`] or a multi-valued sequence of scalars, and a field may be
//! absent altogether. These types are produced by whatever layer fetched or
//! aggregated the data; the grid treats them as immutable input.

mod cell;
mod dataset;
mod header;
mod row;

pub use cell::{CellValue, Scalar};
pub use dataset::{Dataset, DatasetError};
pub use header::Header;
pub use row::{IMAGE_FLAG_KEY, Row};
