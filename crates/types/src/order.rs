use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Order lifecycle labels offered to the operator.
///
/// The client never enforces transitions between these values; the status is
/// submitted as an opaque label using the French wording the back office
/// stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "En attente")]
    Pending,
    #[serde(rename = "En cours")]
    InProgress,
    #[serde(rename = "Prêt à expédier")]
    ReadyToShip,
    #[serde(rename = "Expédié")]
    Shipped,
    #[serde(rename = "Livré")]
    Delivered,
    #[serde(rename = "Annulé")]
    Canceled,
    #[serde(rename = "Retour demandé")]
    ReturnRequested,
    #[serde(rename = "Retour accepté")]
    ReturnAccepted,
    #[serde(rename = "Retour rejeté")]
    ReturnRejected,
    #[serde(rename = "Échoué")]
    Failed,
}

impl OrderStatus {
    /// Every status in the order the selector lists them.
    pub const ALL: [OrderStatus; 10] = [
        Self::Pending,
        Self::InProgress,
        Self::ReadyToShip,
        Self::Shipped,
        Self::Delivered,
        Self::Canceled,
        Self::ReturnRequested,
        Self::ReturnAccepted,
        Self::ReturnRejected,
        Self::Failed,
    ];

    /// Wire and display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::InProgress => "En cours",
            Self::ReadyToShip => "Prêt à expédier",
            Self::Shipped => "Expédié",
            Self::Delivered => "Livré",
            Self::Canceled => "Annulé",
            Self::ReturnRequested => "Retour demandé",
            Self::ReturnAccepted => "Retour accepté",
            Self::ReturnRejected => "Retour rejeté",
            Self::Failed => "Échoué",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseOrderStatusError(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrderStatusError(pub String);

impl fmt::Display for ParseOrderStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = OrderStatus::ALL.iter().map(OrderStatus::label).collect::<Vec<_>>().join(", ");
        write!(f, "unknown order status '{}'; expected one of: {}", self.0, known)
    }
}

impl Error for ParseOrderStatusError {}

/// Body of the order creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub supplier_id: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub client_id: String,
    pub product_ids: Vec<String>,
}
