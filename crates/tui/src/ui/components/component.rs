//! Component system for the grid viewer.
//!
//! Components are self-contained UI elements. They react to input by mutating
//! [`App`] and reporting side effects as [`Effect`]s; rendering draws into the
//! `Rect` the parent hands them.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::app::{App, Effect};

/// A UI component with its own layout memory and behavior.
///
/// Components remember the area they were last rendered into so that mouse
/// events, which arrive in absolute terminal coordinates, can be mapped back
/// onto their content.
pub trait Component {
    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events that fall inside or concern this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Rendering may refresh cached layout (areas, viewport sizes) but should
    /// not change application state visible to other components.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
