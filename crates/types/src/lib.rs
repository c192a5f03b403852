//! Shared type definitions for the Yousmala back office client.
//!
//! The types here mirror the JSON shapes exchanged with the back office REST
//! API (reference records, the order creation payload and product write
//! bodies) plus a few small presentation enums shared by the engine and the
//! front ends.

use serde::{Deserialize, Serialize};

pub mod order;
pub mod product;
pub mod reference;

pub use order::{OrderPayload, OrderStatus, ParseOrderStatusError};
pub use product::ProductInput;
pub use reference::{Client, Product, ReferenceRecord, Supplier};

/// Severity attached to user-facing notifications and log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Short uppercase tag used when rendering log lines.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}
