//! Field-level validation of the order draft.
//!
//! Validation either yields the payload to submit or one message per failing
//! field, in form order.

use std::fmt;

use indexmap::IndexMap;
use yousmala_types::OrderPayload;

use super::OrderDraft;

pub const SUPPLIER_REQUIRED: &str = "Le fournisseur est requis";
pub const AMOUNT_REQUIRED: &str = "Le montant total est requis";
pub const AMOUNT_INVALID: &str = "Le montant total doit être un nombre positif";
pub const STATUS_REQUIRED: &str = "Le statut est requis";
pub const CLIENT_REQUIRED: &str = "Le client est requis";

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Supplier,
    TotalAmount,
    Status,
    Client,
    Products,
}

impl OrderField {
    pub const ALL: [OrderField; 5] = [
        Self::Supplier,
        Self::TotalAmount,
        Self::Status,
        Self::Client,
        Self::Products,
    ];

    /// Key of the field in the order payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Supplier => "supplierId",
            Self::TotalAmount => "totalAmount",
            Self::Status => "status",
            Self::Client => "clientId",
            Self::Products => "productIds",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Products)
    }
}

/// Validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: IndexMap<OrderField, String>,
}

impl FieldErrors {
    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: OrderField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn remove(&mut self, field: OrderField) -> Option<String> {
        self.errors.shift_remove(&field)
    }

    fn insert(&mut self, field: OrderField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field.wire_name(), message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Validate a draft, producing the payload to submit.
///
/// Every required field is checked so the operator sees all problems at once.
pub fn validate_draft(draft: &OrderDraft) -> Result<OrderPayload, FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.supplier_id.is_none() {
        errors.insert(OrderField::Supplier, SUPPLIER_REQUIRED);
    }

    let total_amount = match parse_amount(&draft.total_amount) {
        Ok(amount) => Some(amount),
        Err(message) => {
            errors.insert(OrderField::TotalAmount, message);
            None
        }
    };

    if draft.status.is_none() {
        errors.insert(OrderField::Status, STATUS_REQUIRED);
    }
    if draft.client_id.is_none() {
        errors.insert(OrderField::Client, CLIENT_REQUIRED);
    }

    match (&draft.supplier_id, total_amount, draft.status, &draft.client_id) {
        (Some(supplier_id), Some(total_amount), Some(status), Some(client_id)) if errors.is_empty() => Ok(OrderPayload {
            supplier_id: supplier_id.clone(),
            total_amount,
            status,
            client_id: client_id.clone(),
            product_ids: draft.product_ids.iter().cloned().collect(),
        }),
        _ => Err(errors),
    }
}

/// Parse the typed amount. A decimal comma is accepted.
fn parse_amount(raw: &str) -> Result<f64, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AMOUNT_REQUIRED);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        // `-0` parses to negative zero; send it as plain zero.
        Ok(amount) if amount == 0.0 => Ok(0.0),
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(AMOUNT_INVALID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yousmala_types::OrderStatus;

    fn complete_draft() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.set_supplier("S1");
        draft.set_total_amount("100");
        draft.set_status(OrderStatus::Pending);
        draft.set_client("C1");
        draft.set_products(["P1", "P2"]);
        draft
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = validate_draft(&OrderDraft::default()).expect_err("empty draft is invalid");

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(OrderField::Supplier), Some(SUPPLIER_REQUIRED));
        assert_eq!(errors.get(OrderField::TotalAmount), Some(AMOUNT_REQUIRED));
        assert_eq!(errors.get(OrderField::Status), Some(STATUS_REQUIRED));
        assert_eq!(errors.get(OrderField::Client), Some(CLIENT_REQUIRED));
        assert!(!errors.contains(OrderField::Products));
    }

    #[test]
    fn complete_draft_becomes_payload() {
        let payload = validate_draft(&complete_draft()).expect("valid draft");
        assert_eq!(payload.supplier_id, "S1");
        assert_eq!(payload.total_amount, 100.0);
        assert_eq!(payload.status, OrderStatus::Pending);
        assert_eq!(payload.client_id, "C1");
        assert_eq!(payload.product_ids, vec!["P1".to_string(), "P2".to_string()]);
    }

    #[test]
    fn products_are_optional() {
        let mut draft = complete_draft();
        draft.set_products(Vec::<String>::new());
        assert!(validate_draft(&draft).expect("valid without products").product_ids.is_empty());
    }

    #[test]
    fn negative_and_non_numeric_amounts_are_rejected() {
        for raw in ["-1", "abc", "NaN", "inf"] {
            let mut draft = complete_draft();
            draft.set_total_amount(raw);
            let errors = validate_draft(&draft).expect_err("amount rejected");
            assert_eq!(errors.get(OrderField::TotalAmount), Some(AMOUNT_INVALID), "amount {raw}");
        }
    }

    #[test]
    fn zero_and_decimal_comma_amounts_are_accepted() {
        let mut draft = complete_draft();
        draft.set_total_amount("0");
        assert_eq!(validate_draft(&draft).expect("zero").total_amount, 0.0);

        draft.set_total_amount("12,50");
        assert_eq!(validate_draft(&draft).expect("comma").total_amount, 12.5);
    }

    #[test]
    fn negative_zero_is_sent_as_zero() {
        let mut draft = complete_draft();
        draft.set_total_amount("-0,0");
        let amount = validate_draft(&draft).expect("zero").total_amount;
        assert_eq!(amount, 0.0);
        assert!(amount.is_sign_positive());
        assert_eq!(serde_json::to_string(&amount).expect("serialize"), "0.0");
    }

    #[test]
    fn display_lists_fields_in_form_order() {
        let errors = validate_draft(&OrderDraft::default()).expect_err("invalid");
        assert!(errors.to_string().starts_with("supplierId: Le fournisseur est requis; totalAmount:"));
    }
}
