//! Order entry workflow.
//!
//! [`OrderEntryWorkflow`] owns everything the order creation modal needs:
//! the draft, per-field validation errors, the reference lists, the modal
//! open/closed state with its edit flag, and the notifications raised by a
//! submission.
//!
//! The modal moves `Closed -> Open` on [`OrderEntryWorkflow::open_create_modal`],
//! and back to `Closed` on a successful submission or a cancel. A failed
//! validation or a failed write leaves it open with the operator's values.
//!
//! Network work is split from state changes so an event loop can run it in
//! the background: [`OrderEntryWorkflow::begin_submit`] hands out the payload
//! with a [`SubmissionTicket`] and [`OrderEntryWorkflow::complete_submit`]
//! applies the server's answer. [`OrderEntryWorkflow::submit`] chains both
//! for callers that can await.
//!
//! Cancelling or reopening the form detaches any write still in flight. Its
//! answer is then only reported as a notification; the form the operator is
//! working on is left untouched.

mod draft;
mod reference;
mod validation;

pub use draft::OrderDraft;
pub use reference::{ReferenceData, ReferenceFetch, ReferenceKind, ReferenceList, fetch_reference_list};
pub use validation::{
    AMOUNT_INVALID, AMOUNT_REQUIRED, CLIENT_REQUIRED, FieldErrors, OrderField, STATUS_REQUIRED, SUPPLIER_REQUIRED,
    validate_draft,
};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};
use yousmala_api::{ApiError, BackOfficeApi};
use yousmala_types::{OrderPayload, Severity};

use crate::notifications::Notifications;

pub const ORDER_CREATED_MESSAGE: &str = "Commande ajoutée avec succès";
pub const ORDER_FAILED_MESSAGE: &str = "Erreur lors de l'ajout de la commande";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Why a submission did not reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("the order form is not open")]
    ModalClosed,
    #[error("an order submission is already in progress")]
    InFlight,
    #[error("invalid order: {0}")]
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The back office accepted the order; carries its response body.
    Created(Value),
    /// Nothing was sent.
    Rejected(SubmitRejection),
    /// The write request failed; carries the error description.
    Failed(String),
    /// The write finished after its form was cancelled or reopened. Only a
    /// notification was raised.
    Detached(Result<Value, String>),
}

/// Identifies one write handed out by [`OrderEntryWorkflow::begin_submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

/// A validated payload together with the ticket its answer must carry back.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub payload: OrderPayload,
}

#[derive(Debug, Default)]
pub struct OrderEntryWorkflow {
    modal: ModalState,
    is_edit: bool,
    draft: OrderDraft,
    field_errors: FieldErrors,
    reference: ReferenceData,
    notifications: Notifications,
    /// The write issued by the current form, if any.
    in_flight: Option<SubmissionTicket>,
    next_ticket: u64,
}

impl OrderEntryWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal == ModalState::Open
    }

    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    /// A write issued by the current form is awaiting its answer.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        &mut self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Forget the validation message of a field the operator just edited.
    pub fn clear_field_error(&mut self, field: OrderField) {
        self.field_errors.remove(field);
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Modal title for the current mode.
    pub fn title(&self) -> &'static str {
        if self.is_edit { "Modifier la commande" } else { "Ajouter une commande" }
    }

    /// Label of the confirm button for the current mode.
    pub fn confirm_label(&self) -> &'static str {
        if self.is_edit { "Modifier" } else { "Ajouter" }
    }

    pub fn cancel_label(&self) -> &'static str {
        "Annuler"
    }

    /// Fetch the three reference lists concurrently and apply each result.
    ///
    /// Returns the kinds that failed to load.
    pub async fn load_reference_data(&mut self, api: &dyn BackOfficeApi) -> Vec<ReferenceKind> {
        let (suppliers, clients, products) = tokio::join!(
            fetch_reference_list(api, ReferenceKind::Suppliers),
            fetch_reference_list(api, ReferenceKind::Clients),
            fetch_reference_list(api, ReferenceKind::Products),
        );
        [suppliers, clients, products]
            .into_iter()
            .filter_map(|fetch| {
                let kind = fetch.kind;
                self.apply_reference_fetch(fetch).err().map(|_| kind)
            })
            .collect()
    }

    /// Apply one reference list result. A failure is logged and leaves that
    /// list empty. Returns the number of loaded entries or the error text.
    pub fn apply_reference_fetch(&mut self, fetch: ReferenceFetch) -> Result<usize, String> {
        match fetch.result {
            Ok(list) => {
                let count = list.len();
                debug!(list = %fetch.kind, count, "reference list loaded");
                self.reference.replace(list);
                Ok(count)
            }
            Err(err) => {
                error!(list = %fetch.kind, error = %err, "There was an error fetching reference data");
                self.reference.clear(fetch.kind);
                Err(err.to_string())
            }
        }
    }

    /// Open the modal in create mode with an empty form.
    pub fn open_create_modal(&mut self) {
        self.is_edit = false;
        self.draft = OrderDraft::default();
        self.field_errors.clear();
        self.in_flight = None;
        self.modal = ModalState::Open;
    }

    /// Close the modal without submitting; the draft is discarded and a
    /// write still in flight is detached from the form.
    pub fn cancel(&mut self) {
        self.modal = ModalState::Closed;
        self.draft = OrderDraft::default();
        self.field_errors.clear();
        self.in_flight = None;
    }

    /// Validate the draft and hand out the payload to write.
    ///
    /// On success the workflow is marked as submitting until
    /// [`complete_submit`](Self::complete_submit) is called with the returned
    /// ticket. Validation failures are stored per field and no write must be
    /// issued.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitRejection> {
        if !self.is_modal_open() {
            return Err(SubmitRejection::ModalClosed);
        }
        if self.in_flight.is_some() {
            return Err(SubmitRejection::InFlight);
        }
        match validate_draft(&self.draft) {
            Ok(payload) => {
                self.field_errors.clear();
                self.next_ticket += 1;
                let ticket = SubmissionTicket(self.next_ticket);
                self.in_flight = Some(ticket);
                Ok(PendingSubmission { ticket, payload })
            }
            Err(errors) => {
                debug!(errors = %errors, "order draft failed validation");
                self.field_errors = errors.clone();
                Err(SubmitRejection::Invalid(errors))
            }
        }
    }

    /// Apply the result of the write identified by `ticket`.
    pub fn complete_submit(&mut self, ticket: SubmissionTicket, result: Result<Value, ApiError>) -> SubmitOutcome {
        let result = result.map_err(|err| {
            error!(error = %err, "Failed to create order");
            err.to_string()
        });
        self.settle(ticket, result)
    }

    /// Record that the write identified by `ticket` never produced an answer.
    pub fn abandon_submit(&mut self, ticket: SubmissionTicket, reason: impl Into<String>) -> SubmitOutcome {
        let reason = reason.into();
        error!(%reason, "order submission was interrupted");
        self.settle(ticket, Err(reason))
    }

    fn settle(&mut self, ticket: SubmissionTicket, result: Result<Value, String>) -> SubmitOutcome {
        if self.in_flight != Some(ticket) {
            info!(?ticket, succeeded = result.is_ok(), "answer for a detached order submission");
            let (severity, message) = match &result {
                Ok(_) => (Severity::Success, ORDER_CREATED_MESSAGE),
                Err(_) => (Severity::Error, ORDER_FAILED_MESSAGE),
            };
            self.notifications.push(severity, message);
            return SubmitOutcome::Detached(result);
        }

        self.in_flight = None;
        match result {
            Ok(created) => {
                info!("order created");
                self.modal = ModalState::Closed;
                self.draft = OrderDraft::default();
                self.field_errors.clear();
                self.notifications.push(Severity::Success, ORDER_CREATED_MESSAGE);
                SubmitOutcome::Created(created)
            }
            Err(reason) => {
                self.notifications.push(Severity::Error, ORDER_FAILED_MESSAGE);
                SubmitOutcome::Failed(reason)
            }
        }
    }

    /// Validate and, when valid, write the draft with a single request.
    pub async fn submit(&mut self, api: &dyn BackOfficeApi) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let result = api.create_order(&pending.payload).await;
        self.complete_submit(pending.ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;
    use yousmala_types::{Client, OrderStatus, Product, Supplier};

    use super::*;

    #[derive(Default)]
    struct FakeBackOffice {
        failing_lists: Vec<ReferenceKind>,
        reject_orders: bool,
        orders: Mutex<Vec<OrderPayload>>,
    }

    impl FakeBackOffice {
        fn failure(&self, kind: ReferenceKind) -> Option<ApiError> {
            self.failing_lists.contains(&kind).then(|| ApiError::Status {
                status: 503,
                summary: format!("{kind} unavailable"),
            })
        }

        fn recorded_orders(&self) -> Vec<OrderPayload> {
            self.orders.lock().expect("orders lock").clone()
        }
    }

    #[async_trait::async_trait]
    impl BackOfficeApi for FakeBackOffice {
        async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
            match self.failure(ReferenceKind::Suppliers) {
                Some(error) => Err(error),
                None => Ok(vec![Supplier {
                    supplier_id: "S1".into(),
                    name: "Coton Sud".into(),
                }]),
            }
        }

        async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
            match self.failure(ReferenceKind::Clients) {
                Some(error) => Err(error),
                None => Ok(vec![Client {
                    client_id: "C1".into(),
                    firstname: "Amina".into(),
                    last_name: "Benali".into(),
                }]),
            }
        }

        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            match self.failure(ReferenceKind::Products) {
                Some(error) => Err(error),
                None => Ok(vec![
                    Product {
                        product_id: "P1".into(),
                        name: "Drap".into(),
                    },
                    Product {
                        product_id: "P2".into(),
                        name: "Serviette".into(),
                    },
                ]),
            }
        }

        async fn create_order(&self, order: &OrderPayload) -> Result<Value, ApiError> {
            self.orders.lock().expect("orders lock").push(order.clone());
            if self.reject_orders {
                Err(ApiError::Status {
                    status: 500,
                    summary: "Server error (500)".into(),
                })
            } else {
                Ok(json!({"orderId": "O1"}))
            }
        }
    }

    fn fill_example_draft(workflow: &mut OrderEntryWorkflow) {
        let draft = workflow.draft_mut();
        draft.set_supplier("S1");
        draft.set_total_amount("100");
        draft.set_status(OrderStatus::Pending);
        draft.set_client("C1");
        draft.toggle_product("P1");
        draft.toggle_product("P2");
    }

    #[tokio::test]
    async fn empty_submission_reports_each_required_field_without_writing() {
        let api = FakeBackOffice::default();
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();

        let outcome = workflow.submit(&api).await;

        let SubmitOutcome::Rejected(SubmitRejection::Invalid(errors)) = outcome else {
            panic!("expected validation rejection, got {outcome:?}");
        };
        for field in OrderField::ALL.into_iter().filter(OrderField::is_required) {
            assert!(errors.contains(field), "missing error for {field:?}");
        }
        assert!(api.recorded_orders().is_empty());
        assert!(workflow.is_modal_open());
        assert_eq!(workflow.field_errors(), &errors);
    }

    #[tokio::test]
    async fn valid_submission_writes_once_then_closes_and_resets() {
        let api = FakeBackOffice::default();
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);

        let outcome = workflow.submit(&api).await;

        assert_eq!(outcome, SubmitOutcome::Created(json!({"orderId": "O1"})));
        let orders = api.recorded_orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(
            serde_json::to_value(&orders[0]).expect("serialize"),
            json!({
                "supplierId": "S1",
                "totalAmount": 100.0,
                "status": "En attente",
                "clientId": "C1",
                "productIds": ["P1", "P2"]
            })
        );
        assert_eq!(workflow.modal_state(), ModalState::Closed);
        assert!(workflow.draft().is_empty());
        assert_eq!(
            workflow.notifications().latest().map(|n| (n.severity, n.message.as_str())),
            Some((Severity::Success, ORDER_CREATED_MESSAGE))
        );

        workflow.open_create_modal();
        assert!(workflow.draft().is_empty());
        assert!(workflow.field_errors().is_empty());
    }

    #[tokio::test]
    async fn failed_write_keeps_modal_open_with_entered_values() {
        let api = FakeBackOffice {
            reject_orders: true,
            ..FakeBackOffice::default()
        };
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);
        let entered = workflow.draft().clone();

        let outcome = workflow.submit(&api).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)), "outcome: {outcome:?}");
        assert_eq!(api.recorded_orders().len(), 1);
        assert!(workflow.is_modal_open());
        assert_eq!(workflow.draft(), &entered);
        assert!(!workflow.is_submitting());
        assert_eq!(
            workflow.notifications().latest().map(|n| (n.severity, n.message.as_str())),
            Some((Severity::Error, ORDER_FAILED_MESSAGE))
        );
    }

    #[tokio::test]
    async fn one_failing_list_leaves_the_others_populated() {
        let api = FakeBackOffice {
            failing_lists: vec![ReferenceKind::Suppliers],
            ..FakeBackOffice::default()
        };
        let mut workflow = OrderEntryWorkflow::new();

        let failed = workflow.load_reference_data(&api).await;

        assert_eq!(failed, vec![ReferenceKind::Suppliers]);
        assert!(workflow.reference().suppliers.is_empty());
        assert_eq!(workflow.reference().clients.len(), 1);
        assert_eq!(workflow.reference().products.len(), 2);
    }

    #[tokio::test]
    async fn submit_requires_an_open_modal() {
        let api = FakeBackOffice::default();
        let mut workflow = OrderEntryWorkflow::new();
        fill_example_draft(&mut workflow);

        let outcome = workflow.submit(&api).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(SubmitRejection::ModalClosed));
        assert!(api.recorded_orders().is_empty());
    }

    #[test]
    fn second_submission_is_rejected_while_first_is_in_flight() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);

        assert!(workflow.begin_submit().is_ok());
        assert_eq!(workflow.begin_submit(), Err(SubmitRejection::InFlight));
    }

    #[test]
    fn cancel_closes_and_discards_the_draft() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);

        workflow.cancel();

        assert_eq!(workflow.modal_state(), ModalState::Closed);
        assert!(workflow.draft().is_empty());
    }

    #[test]
    fn reopening_clears_previous_validation_errors() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        assert!(workflow.begin_submit().is_err());
        assert!(!workflow.field_errors().is_empty());

        workflow.open_create_modal();

        assert!(workflow.field_errors().is_empty());
        assert!(!workflow.is_edit());
        assert_eq!(workflow.title(), "Ajouter une commande");
        assert_eq!(workflow.confirm_label(), "Ajouter");
    }

    #[test]
    fn answer_for_cancelled_form_leaves_reopened_form_alone() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);
        let first = workflow.begin_submit().expect("valid draft");

        workflow.cancel();
        assert!(!workflow.is_submitting());
        workflow.open_create_modal();
        workflow.draft_mut().set_supplier("S2");
        workflow.draft_mut().set_total_amount("55");

        let outcome = workflow.complete_submit(first.ticket, Ok(json!({"orderId": "O1"})));

        assert_eq!(outcome, SubmitOutcome::Detached(Ok(json!({"orderId": "O1"}))));
        assert!(workflow.is_modal_open());
        assert_eq!(workflow.draft().supplier_id.as_deref(), Some("S2"));
        assert_eq!(workflow.draft().total_amount, "55");
        assert_eq!(
            workflow.notifications().latest().map(|n| (n.severity, n.message.as_str())),
            Some((Severity::Success, ORDER_CREATED_MESSAGE))
        );
    }

    #[test]
    fn reopened_form_can_submit_while_detached_write_is_pending() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);
        let first = workflow.begin_submit().expect("valid draft");

        workflow.cancel();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);
        let second = workflow.begin_submit().expect("new form is not blocked");
        assert_ne!(first.ticket, second.ticket);

        let error = ApiError::Status {
            status: 500,
            summary: "Server error".into(),
        };
        assert!(matches!(workflow.complete_submit(first.ticket, Err(error)), SubmitOutcome::Detached(Err(_))));
        assert!(workflow.is_submitting());

        let outcome = workflow.complete_submit(second.ticket, Ok(Value::Null));
        assert_eq!(outcome, SubmitOutcome::Created(Value::Null));
        assert!(!workflow.is_modal_open());
    }

    #[test]
    fn interrupted_write_releases_the_form() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        fill_example_draft(&mut workflow);
        let pending = workflow.begin_submit().expect("valid draft");

        let outcome = workflow.abandon_submit(pending.ticket, "task panicked");

        assert_eq!(outcome, SubmitOutcome::Failed("task panicked".into()));
        assert!(!workflow.is_submitting());
        assert!(workflow.is_modal_open());
        assert!(workflow.begin_submit().is_ok());
    }
}
