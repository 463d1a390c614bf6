mod grid_component;
mod grid_view;

pub use grid_component::GridComponent;
