//! Activity log panel.
//!
//! Newest lines are kept at the bottom; when the panel is too short the oldest
//! visible lines scroll off the top.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::state::LogEntry;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

#[derive(Debug, Default)]
pub struct LogsComponent;

impl LogsComponent {
    fn line_for<'a>(theme: &dyn Theme, entry: &'a LogEntry) -> Line<'a> {
        Line::from(vec![
            Span::styled(entry.timestamp.format("%H:%M:%S ").to_string(), theme.text_muted_style()),
            Span::styled(format!("[{:<5}] ", entry.severity.tag()), th::severity_style(theme, entry.severity)),
            Span::styled(entry.message.as_str(), theme.text_primary_style()),
        ])
    }
}

impl Component for LogsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let block = th::block(theme, Some("Journal"), false);
        let visible_rows = block.inner(rect).height as usize;

        let entries = app.logs.entries();
        let start = entries.len().saturating_sub(visible_rows);
        let lines: Vec<Line> = entries[start..].iter().map(|entry| Self::line_for(theme, entry)).collect();

        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}
