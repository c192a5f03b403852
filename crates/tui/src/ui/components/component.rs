//! Component system for the order entry terminal.
//!
//! Components are self-contained UI elements. They handle the keys routed to
//! them, render into the area they are given, and report side effects back to
//! the application as [`Effect`]s instead of performing I/O themselves.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::{App, Effect, Msg};

pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events routed to this component.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Key hints shown in the footer while this component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations draw and place the cursor only; state changes belong in
    /// the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
