//! UI components: order form, activity log, notifications.

pub mod component;
pub mod logs;
pub mod notifications;
pub mod order_form;

pub(crate) use component::Component;
pub use logs::LogsComponent;
pub use notifications::NotificationsComponent;
pub use order_form::OrderFormComponent;
