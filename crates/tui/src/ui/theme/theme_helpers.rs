use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use yousmala_types::Severity;

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Input text style; invalid input is drawn in the error color.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let ThemeRoles { surface, text, error, .. } = *theme.roles();
    let mut style = Style::default().bg(surface).fg(if valid { text } else { error });
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Primary button style (filled accent background).
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, enabled: bool) -> Style {
    let roles = theme.roles();
    if enabled {
        Style::default()
            .bg(roles.accent_primary)
            .fg(roles.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(roles.surface_muted).fg(roles.text_muted)
    }
}

/// Secondary button style (outline-like, relies on the border color).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, selected: bool) -> Style {
    if !enabled {
        return theme.text_muted_style();
    }
    let style = Style::default().fg(theme.roles().accent_secondary);
    if selected { style.bg(theme.roles().selection_bg) } else { style }
}

/// Foreground style for a notification or log severity.
pub fn severity_style<T: Theme + ?Sized>(theme: &T, severity: Severity) -> Style {
    match severity {
        Severity::Info => theme.status_info(),
        Severity::Success => theme.status_success(),
        Severity::Warning => theme.status_warning(),
        Severity::Error => theme.status_error(),
    }
}

/// Build `key action` hint spans for the footer.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key}"), theme.accent_emphasis_style()));
        spans.push(Span::styled(format!(" {action} "), theme.text_muted_style()));
    }
    spans
}

/// Render a button. Primary buttons are filled; secondary buttons are outlined.
#[allow(clippy::too_many_arguments)]
pub fn render_button<T: Theme + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_enabled: bool,
    is_focused: bool,
    is_primary: bool,
    theme: &T,
) {
    let border_style = if is_enabled {
        theme.border_style(is_focused)
    } else {
        theme.text_muted_style()
    };
    let button_style = if is_primary {
        button_primary_style(theme, is_enabled)
    } else {
        button_secondary_style(theme, is_enabled, is_focused)
    };

    frame.render_widget(
        Paragraph::new(label.to_string())
            .centered()
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .padding(Padding::uniform(0)),
            )
            .style(button_style),
        area,
    );
}
