//! Toast notifications raised by the order workflow.
//!
//! Toasts stack downward from the top-right corner, newest first, and
//! disappear once the engine prunes them on tick.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::top_right;

const TOAST_HEIGHT: u16 = 3;
const TOAST_MAX_WIDTH: u16 = 60;

#[derive(Debug, Default)]
pub struct NotificationsComponent;

impl Component for NotificationsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let mut area = rect;
        for notification in app.workflow.notifications().iter().rev() {
            if area.height < TOAST_HEIGHT {
                break;
            }
            let width = (notification.message.width() as u16 + 4).min(TOAST_MAX_WIDTH);
            let toast = top_right(area, width, TOAST_HEIGHT);
            let style = th::severity_style(theme, notification.severity);

            frame.render_widget(Clear, toast);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(notification.message.as_str(), style)))
                    .block(Block::bordered().border_style(style).style(th::panel_style(theme))),
                toast,
            );

            area.y += TOAST_HEIGHT;
            area.height -= TOAST_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use yousmala_types::Severity;

    use super::*;
    use crate::ui::theme::DraculaTheme;

    #[test]
    fn renders_latest_notification_in_the_corner() {
        let mut app = App::with_theme(Box::new(DraculaTheme::new()));
        app.workflow
            .notifications_mut()
            .push(Severity::Success, "Commande ajoutée avec succès");

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                NotificationsComponent.render(frame, area, &mut app);
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let first_rows: String = (0u16..3)
            .flat_map(|y| (0u16..80).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        assert!(first_rows.contains("Commande ajoutée avec succès"));
        assert_eq!(buffer[(79u16, 0u16)].symbol(), "┐");
    }
}
