//! Order form modal.
//!
//! Selectors (supplier, status, client) are stepped with the arrow keys, the
//! amount is typed, and products are toggled in a checklist. Values are
//! written straight into the engine draft; editing a field clears its
//! validation message.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;
use yousmala_engine::{OrderField, ReferenceKind};
use yousmala_types::{OrderStatus, ReferenceRecord};

use super::state::cycle_selection;
use crate::app::{App, Effect, Msg};
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

const FIELD_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 14;

#[derive(Debug, Default)]
pub struct OrderFormComponent;

impl OrderFormComponent {
    fn handle_field_key(&self, app: &mut App, field: OrderField, key: KeyEvent) {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Down => Some(true),
            KeyCode::Left | KeyCode::Up => Some(false),
            _ => None,
        };

        match field {
            OrderField::Supplier => {
                if let Some(forward) = forward {
                    let ids = ids_of(&app.workflow.reference().suppliers);
                    let next = cycle_selection(&ids, app.workflow.draft().supplier_id.as_ref(), forward);
                    app.workflow.draft_mut().supplier_id = next;
                    app.workflow.clear_field_error(field);
                }
            }
            OrderField::Client => {
                if let Some(forward) = forward {
                    let ids = ids_of(&app.workflow.reference().clients);
                    let next = cycle_selection(&ids, app.workflow.draft().client_id.as_ref(), forward);
                    app.workflow.draft_mut().client_id = next;
                    app.workflow.clear_field_error(field);
                }
            }
            OrderField::Status => {
                if let Some(forward) = forward {
                    let next = cycle_selection(&OrderStatus::ALL, app.workflow.draft().status.as_ref(), forward);
                    app.workflow.draft_mut().status = next;
                    app.workflow.clear_field_error(field);
                }
            }
            OrderField::TotalAmount => match key.code {
                KeyCode::Char(c) if !c.is_control() => {
                    app.workflow.draft_mut().total_amount.push(c);
                    app.workflow.clear_field_error(field);
                }
                KeyCode::Backspace => {
                    app.workflow.draft_mut().total_amount.pop();
                    app.workflow.clear_field_error(field);
                }
                _ => {}
            },
            OrderField::Products => {
                let product_count = app.workflow.reference().products.len();
                match key.code {
                    KeyCode::Down => app.order_form.move_product_cursor(product_count, true),
                    KeyCode::Up => app.order_form.move_product_cursor(product_count, false),
                    KeyCode::Char(' ') => {
                        let cursor = app.order_form.product_cursor;
                        if let Some(product_id) = app.workflow.reference().products.get(cursor).map(|p| p.product_id.clone()) {
                            app.workflow.draft_mut().toggle_product(&product_id);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn render_selector(
        &self,
        frame: &mut Frame,
        area: Rect,
        app: &App,
        field: OrderField,
        label: &'static str,
        value: Option<String>,
        placeholder: &'static str,
    ) {
        let theme = &*app.theme;
        let focused = app.order_form.flag_for(field).get();
        let block = field_block(theme, app, field, label, focused);

        let line = match value {
            Some(value) => Line::from(vec![
                Span::styled("◀ ", theme.text_muted_style()),
                Span::styled(value, th::input_style(theme, true, focused)),
                Span::styled(" ▶", theme.text_muted_style()),
            ]),
            None => Line::from(Span::styled(placeholder, theme.text_muted_style())),
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_amount(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let focused = app.order_form.f_amount.get();
        let valid = !app.workflow.field_errors().contains(OrderField::TotalAmount);
        let block = field_block(theme, app, OrderField::TotalAmount, "Montant Total", focused);
        let inner = block.inner(area);

        let amount = app.workflow.draft().total_amount.as_str();
        let paragraph = if amount.is_empty() && !focused {
            Paragraph::new(Span::styled("0,00", theme.text_muted_style()))
        } else {
            Paragraph::new(Span::styled(amount.to_string(), th::input_style(theme, valid, focused)))
        };
        frame.render_widget(paragraph.block(block), area);

        if focused {
            let offset = (amount.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((inner.x + offset, inner.y));
        }
    }

    fn render_products(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let focused = app.order_form.f_products.get();
        let block = field_block(theme, app, OrderField::Products, "Produits", focused);
        let visible_rows = block.inner(area).height as usize;

        let products = &app.workflow.reference().products;
        let lines: Vec<Line> = if products.is_empty() {
            let text = if app.is_loading(ReferenceKind::Products) {
                "Chargement des produits..."
            } else {
                "Aucun produit disponible"
            };
            vec![Line::from(Span::styled(text, theme.text_muted_style()))]
        } else {
            let cursor = app.order_form.product_cursor;
            let first = (cursor + 1).saturating_sub(visible_rows.max(1));
            products
                .iter()
                .enumerate()
                .skip(first)
                .take(visible_rows)
                .map(|(index, product)| {
                    let checked = app.workflow.draft().product_ids.contains(&product.product_id);
                    let marker = if checked { "[x] " } else { "[ ] " };
                    let style = if focused && index == cursor {
                        theme.selection_style()
                    } else if checked {
                        theme.accent_primary_style()
                    } else {
                        theme.text_primary_style()
                    };
                    Line::from(Span::styled(format!("{marker}{}", product.label()), style))
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let [_, confirm_area, cancel_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .spacing(1)
        .areas(area);

        let submitting = app.workflow.is_submitting();
        th::render_button(
            frame,
            confirm_area,
            app.workflow.confirm_label(),
            !submitting,
            app.order_form.f_confirm.get(),
            true,
            theme,
        );
        th::render_button(
            frame,
            cancel_area,
            app.workflow.cancel_label(),
            true,
            app.order_form.f_cancel.get(),
            false,
            theme,
        );
    }
}

impl Component for OrderFormComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => return vec![Effect::SendMsg(Msg::CancelModal)],
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            KeyCode::Enter => {
                if app.order_form.f_cancel.get() {
                    return vec![Effect::SendMsg(Msg::CancelModal)];
                }
                return vec![Effect::SendMsg(Msg::SubmitRequested)];
            }
            _ => {}
        }

        if let Some(field) = app.order_form.focused_field() {
            self.handle_field_key(app, field, key);
        }
        Vec::new()
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let mut hints = vec![("Tab", "Champ suivant")];
        match app.order_form.focused_field() {
            Some(OrderField::Products) => hints.extend([("↑/↓", "Parcourir"), ("Espace", "Cocher")]),
            Some(OrderField::TotalAmount) => hints.push(("0-9", "Saisir")),
            Some(_) => hints.push(("←/→", "Choisir")),
            None => {}
        }
        hints.extend([("Entrée", "Valider"), ("Échap", "Annuler")]);
        th::build_hint_spans(&*app.theme, &hints)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        frame.render_widget(Clear, rect);
        let outer = th::block(theme, Some(app.workflow.title()), true);
        let inner = outer.inner(rect);
        frame.render_widget(outer, rect);

        let [supplier, amount, status, client, products, buttons] = Layout::vertical([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
        ])
        .areas(inner);

        let reference = app.workflow.reference();
        let draft = app.workflow.draft();
        let supplier_label = draft
            .supplier_id
            .as_deref()
            .map(|id| label_for(&reference.suppliers, id));
        let client_label = draft.client_id.as_deref().map(|id| label_for(&reference.clients, id));
        let status_label = draft.status.map(|status| status.label().to_string());

        self.render_selector(
            frame,
            supplier,
            app,
            OrderField::Supplier,
            "Fournisseur",
            supplier_label,
            placeholder(app, ReferenceKind::Suppliers, "Sélectionner un fournisseur"),
        );
        self.render_amount(frame, amount, app);
        self.render_selector(
            frame,
            status,
            app,
            OrderField::Status,
            "Statut",
            status_label,
            "Sélectionner un statut",
        );
        self.render_selector(
            frame,
            client,
            app,
            OrderField::Client,
            "Client",
            client_label,
            placeholder(app, ReferenceKind::Clients, "Sélectionner un client"),
        );
        self.render_products(frame, products, app);
        self.render_buttons(frame, buttons, app);
    }
}

/// Field box with its label on top and the validation message, if any, on the bottom border.
fn field_block<'a>(theme: &dyn Theme, app: &'a App, field: OrderField, label: &'static str, focused: bool) -> Block<'a> {
    let title = if field.is_required() {
        Line::from(vec![
            Span::styled(label, theme.text_secondary_style().add_modifier(Modifier::BOLD)),
            Span::styled(" *", theme.status_error()),
        ])
    } else {
        Line::from(Span::styled(label, theme.text_secondary_style().add_modifier(Modifier::BOLD)))
    };

    let mut block = th::block(theme, None, focused).title(title);
    if let Some(message) = app.workflow.field_errors().get(field) {
        block = block
            .border_style(theme.status_error())
            .title_bottom(Span::styled(message, theme.status_error()));
    }
    block
}

fn ids_of<R: ReferenceRecord>(records: &[R]) -> Vec<String> {
    records.iter().map(|record| record.id().to_string()).collect()
}

/// Display label of a record, falling back to the raw id when it is not listed.
fn label_for<R: ReferenceRecord>(records: &[R], id: &str) -> String {
    records
        .iter()
        .find(|record| record.id() == id)
        .map_or_else(|| id.to_string(), ReferenceRecord::label)
}

fn placeholder(app: &App, kind: ReferenceKind, idle: &'static str) -> &'static str {
    if app.is_loading(kind) { "Chargement..." } else { idle }
}
