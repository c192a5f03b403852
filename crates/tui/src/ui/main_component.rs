use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use yousmala_engine::ReferenceKind;

use super::components::{Component, LogsComponent, NotificationsComponent, OrderFormComponent};
use super::theme::theme_helpers as th;
use super::utils::centered_rect_with_min;
use crate::app::{App, Effect, Msg, reference_label};

/// Smallest modal that still fits every field and the buttons.
const MODAL_MIN_WIDTH: u16 = 60;
const MODAL_MIN_HEIGHT: u16 = 24;

/// Root view: header, activity log, hint bar, and the order form overlay.
#[derive(Debug, Default)]
pub struct MainView {
    order_form: OrderFormComponent,
    logs_view: LogsComponent,
    notifications_view: NotificationsComponent,
}

impl MainView {
    fn render_header(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let reference = app.workflow.reference();
        let mut spans = vec![Span::styled("Yousmala · Commandes  ", theme.accent_emphasis_style())];
        for (kind, count) in [
            (ReferenceKind::Suppliers, reference.suppliers.len()),
            (ReferenceKind::Clients, reference.clients.len()),
            (ReferenceKind::Products, reference.products.len()),
        ] {
            let value = if app.is_loading(kind) { "…".to_string() } else { count.to_string() };
            spans.push(Span::styled(format!("{} ", reference_label(kind)), theme.text_muted_style()));
            spans.push(Span::styled(format!("{value}  "), theme.text_primary_style()));
        }
        if app.workflow.is_submitting() {
            spans.push(Span::styled("envoi en cours", theme.status_info()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(th::block(theme, None, false)), area);
    }

    fn hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        if app.workflow.is_modal_open() {
            self.order_form.get_hint_spans(app)
        } else {
            th::build_hint_spans(&*app.theme, &[("a", "Ajouter une commande"), ("q", "Quitter")])
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::SendMsg(Msg::Quit)];
        }
        if app.workflow.is_modal_open() {
            return self.order_form.handle_key_events(app, key);
        }
        match key.code {
            KeyCode::Char('a') => vec![Effect::SendMsg(Msg::OpenCreateModal)],
            KeyCode::Char('q') => vec![Effect::SendMsg(Msg::Quit)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        frame.render_widget(Block::default().style(th::panel_style(&*app.theme)), rect);
        let [header, body, hints] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)]).areas(rect);

        self.render_header(frame, header, app);
        self.logs_view.render(frame, body, app);
        frame.render_widget(Paragraph::new(Line::from(self.hint_spans(app))), hints);

        if app.workflow.is_modal_open() {
            frame.render_widget(Block::default().style(app.theme.modal_background_style()), rect);
            let modal = centered_rect_with_min(60, 80, MODAL_MIN_WIDTH, MODAL_MIN_HEIGHT, rect);
            self.order_form.render(frame, modal, app);
        }

        self.notifications_view.render(frame, rect, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn main_screen_keys_open_the_form_and_quit() {
        let mut app = App::with_theme(Box::new(DraculaTheme::new()));
        let mut view = MainView::default();

        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('a')));
        assert!(matches!(effects.as_slice(), [Effect::SendMsg(Msg::OpenCreateModal)]));

        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('q')));
        assert!(matches!(effects.as_slice(), [Effect::SendMsg(Msg::Quit)]));
    }

    #[test]
    fn open_form_receives_typed_characters() {
        let mut app = App::with_theme(Box::new(DraculaTheme::new()));
        let mut view = MainView::default();
        view.handle_message(&mut app, Msg::OpenCreateModal);
        app.focus.focus(&app.order_form.f_amount.clone());

        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('q')));

        assert!(effects.is_empty());
        assert_eq!(app.workflow.draft().total_amount, "q");
    }

    #[test]
    fn ctrl_c_quits_even_with_the_form_open() {
        let mut app = App::with_theme(Box::new(DraculaTheme::new()));
        let mut view = MainView::default();
        view.handle_message(&mut app, Msg::OpenCreateModal);

        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(effects.as_slice(), [Effect::SendMsg(Msg::Quit)]));
    }
}
