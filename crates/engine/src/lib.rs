//! # Yousmala Engine
//!
//! The engine owns the order entry workflow shared by the terminal UI and the
//! headless command line: the order draft and its validation, the reference
//! lists that feed the selectors, the modal open/closed state, and the
//! transient notifications raised by a submission.
//!
//! ## Usage
//!
//! ```ignore
//! use yousmala_api::BackOfficeClient;
//! use yousmala_engine::OrderEntryWorkflow;
//! use yousmala_types::OrderStatus;
//!
//! let api = BackOfficeClient::from_env()?;
//! let mut workflow = OrderEntryWorkflow::new();
//! workflow.load_reference_data(&api).await;
//! workflow.open_create_modal();
//! let draft = workflow.draft_mut();
//! draft.set_supplier("S1");
//! draft.set_total_amount("100");
//! draft.set_status(OrderStatus::Pending);
//! draft.set_client("C1");
//! let outcome = workflow.submit(&api).await;
//! ```
//!
//! ## Architecture
//!
//! - **`order_entry`**: the workflow state machine, draft, validation and
//!   reference data loading
//! - **`notifications`**: transient success/error messages with expiry

pub mod notifications;
pub mod order_entry;

pub use notifications::{NOTIFICATION_TTL, Notification, Notifications};
pub use order_entry::{
    FieldErrors, ModalState, ORDER_CREATED_MESSAGE, ORDER_FAILED_MESSAGE, OrderDraft, OrderEntryWorkflow, OrderField,
    PendingSubmission, ReferenceData, ReferenceFetch, ReferenceKind, ReferenceList, SubmissionTicket, SubmitOutcome,
    SubmitRejection, fetch_reference_list, validate_draft,
};
