//! Application state and message handling for the order entry terminal.
//!
//! [`App`] wraps the engine workflow with the terminal-only concerns: focus,
//! the activity log, the theme, and the set of reference lists still loading.
//! [`App::update`] is the single place where messages mutate state; anything
//! that needs I/O is returned as an [`Effect`] for the runtime to execute.

use std::collections::HashSet;
use std::time::Instant;

use rat_focus::{Focus, FocusBuilder};
use serde_json::Value;
use tracing::{info, warn};
use yousmala_api::ApiError;
use yousmala_engine::{
    OrderEntryWorkflow, OrderField, PendingSubmission, ReferenceFetch, ReferenceKind, SubmissionTicket, SubmitOutcome,
    SubmitRejection,
};
use yousmala_types::Severity;

use crate::ui::components::logs::LogsState;
use crate::ui::components::order_form::OrderFormState;
use crate::ui::theme::{self, Theme};

/// Messages delivered to [`App::update`].
#[derive(Debug)]
pub enum Msg {
    Tick,
    Resize(u16, u16),
    OpenCreateModal,
    CancelModal,
    SubmitRequested,
    ReferenceListLoaded(ReferenceFetch),
    SubmitCompleted(SubmissionTicket, Result<Value, ApiError>),
    /// A background task ended without producing its message.
    TaskFailed { origin: TaskOrigin, reason: String },
    Quit,
}

/// The command a background task was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrigin {
    Reference(ReferenceKind),
    Submission(SubmissionTicket),
}

/// Side effects requested by state updates and components.
#[derive(Debug)]
pub enum Effect {
    SendMsg(Msg),
    LoadReferenceData,
    SubmitOrder(PendingSubmission),
}

pub struct App {
    pub workflow: OrderEntryWorkflow,
    pub order_form: OrderFormState,
    pub logs: LogsState,
    pub focus: Focus,
    pub theme: Box<dyn Theme>,
    pending_loads: HashSet<ReferenceKind>,
    dirty: bool,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::with_theme(theme::load_from_env())
    }

    pub fn with_theme(theme: Box<dyn Theme>) -> Self {
        Self {
            workflow: OrderEntryWorkflow::new(),
            order_form: OrderFormState::default(),
            logs: LogsState::default(),
            focus: Focus::default(),
            theme,
            pending_loads: HashSet::new(),
            dirty: true,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_loading(&self, kind: ReferenceKind) -> bool {
        self.pending_loads.contains(&kind)
    }

    /// Background work is running; the runtime ticks faster while this holds.
    pub fn is_busy(&self) -> bool {
        !self.pending_loads.is_empty() || self.workflow.is_submitting() || !self.workflow.notifications().is_empty()
    }

    /// Record that a reference list fetch has been dispatched.
    pub fn mark_loading(&mut self, kind: ReferenceKind) {
        self.pending_loads.insert(kind);
        self.dirty = true;
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.workflow.notifications_mut().prune(Instant::now()) {
                    self.dirty = true;
                }
                Vec::new()
            }
            Msg::Resize(..) => {
                self.dirty = true;
                Vec::new()
            }
            Msg::OpenCreateModal => {
                self.open_order_form();
                Vec::new()
            }
            Msg::CancelModal => {
                if self.workflow.is_modal_open() {
                    self.workflow.cancel();
                    self.focus = Focus::default();
                    self.logs.push(Severity::Info, "Saisie de la commande annulée");
                    self.dirty = true;
                }
                Vec::new()
            }
            Msg::SubmitRequested => self.request_submit(),
            Msg::ReferenceListLoaded(fetch) => {
                self.apply_reference_fetch(fetch);
                Vec::new()
            }
            Msg::SubmitCompleted(ticket, result) => {
                let outcome = self.workflow.complete_submit(ticket, result);
                self.finish_submit(outcome);
                Vec::new()
            }
            Msg::TaskFailed { origin, reason } => {
                self.task_failed(origin, reason);
                Vec::new()
            }
            Msg::Quit => {
                self.should_quit = true;
                Vec::new()
            }
        }
    }

    fn open_order_form(&mut self) {
        if self.workflow.is_modal_open() {
            return;
        }
        self.workflow.open_create_modal();
        self.order_form.reset();
        self.order_form.clamp_product_cursor(self.workflow.reference().products.len());
        self.focus = FocusBuilder::build_for(&self.order_form);
        self.focus.focus(&self.order_form.f_supplier);
        self.logs.push(Severity::Info, self.workflow.title());
        self.dirty = true;
    }

    fn request_submit(&mut self) -> Vec<Effect> {
        self.dirty = true;
        match self.workflow.begin_submit() {
            Ok(pending) => {
                self.logs.push(Severity::Info, "Envoi de la commande...");
                vec![Effect::SubmitOrder(pending)]
            }
            Err(SubmitRejection::Invalid(errors)) => {
                self.logs.push(Severity::Warning, format!("Formulaire incomplet : {errors}"));
                if let Some((field, _)) = errors.iter().next() {
                    self.focus_field(field);
                }
                Vec::new()
            }
            Err(SubmitRejection::InFlight) => {
                self.logs.push(Severity::Warning, "Une commande est déjà en cours d'envoi");
                Vec::new()
            }
            Err(SubmitRejection::ModalClosed) => Vec::new(),
        }
    }

    fn finish_submit(&mut self, outcome: SubmitOutcome) {
        self.dirty = true;
        match outcome {
            SubmitOutcome::Created(body) => {
                info!(response = %body, "order created");
                if let Some(notification) = self.workflow.notifications().latest() {
                    self.logs.push(Severity::Success, notification.message.clone());
                }
                self.focus = Focus::default();
            }
            SubmitOutcome::Failed(reason) => {
                self.logs.push(Severity::Error, reason);
            }
            SubmitOutcome::Detached(Ok(_)) => {
                self.logs.push(Severity::Success, "Commande précédente ajoutée après l'annulation du formulaire");
            }
            SubmitOutcome::Detached(Err(reason)) => {
                self.logs.push(Severity::Error, format!("Commande précédente non ajoutée : {reason}"));
            }
            SubmitOutcome::Rejected(rejection) => {
                warn!(%rejection, "submission result discarded");
            }
        }
    }

    fn task_failed(&mut self, origin: TaskOrigin, reason: String) {
        warn!(?origin, %reason, "background task failed");
        match origin {
            TaskOrigin::Reference(kind) => {
                self.pending_loads.remove(&kind);
                self.logs.push(
                    Severity::Error,
                    format!("Chargement des {} interrompu : {reason}", reference_label(kind)),
                );
                self.dirty = true;
            }
            TaskOrigin::Submission(ticket) => {
                let outcome = self.workflow.abandon_submit(ticket, reason);
                self.finish_submit(outcome);
            }
        }
    }

    fn apply_reference_fetch(&mut self, fetch: ReferenceFetch) {
        let kind = fetch.kind;
        self.pending_loads.remove(&kind);
        match self.workflow.apply_reference_fetch(fetch) {
            Ok(count) => self.logs.push(Severity::Info, format!("{count} {} chargés", reference_label(kind))),
            Err(reason) => self.logs.push(
                Severity::Error,
                format!("Impossible de charger les {} : {reason}", reference_label(kind)),
            ),
        }
        if kind == ReferenceKind::Products {
            self.order_form.clamp_product_cursor(self.workflow.reference().products.len());
        }
        self.dirty = true;
    }

    /// Move focus to a form field, used to point at the first invalid field.
    pub fn focus_field(&mut self, field: OrderField) {
        let flag = self.order_form.flag_for(field).clone();
        self.focus.focus(&flag);
    }
}

/// French plural used in activity log lines.
pub fn reference_label(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Suppliers => "fournisseurs",
        ReferenceKind::Clients => "clients",
        ReferenceKind::Products => "produits",
    }
}
