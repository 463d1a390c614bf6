//! UI components: grid, details pane, status bar.

pub mod component;
pub mod details;
pub mod grid;
pub mod status_bar;

pub use component::Component;
pub use details::DetailsComponent;
pub use grid::GridComponent;
pub use status_bar::StatusBarComponent;
