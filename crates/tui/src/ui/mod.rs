//! Terminal rendering for the grid viewer: components, theme and the event
//! loop that drives them.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
