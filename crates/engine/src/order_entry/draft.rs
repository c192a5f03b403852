use indexmap::IndexSet;
use yousmala_types::OrderStatus;

/// The not-yet-persisted order being composed in the form.
///
/// Selections are `None` until the operator picks a value. The amount keeps
/// the raw text typed by the operator; it is only parsed by validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub supplier_id: Option<String>,
    pub total_amount: String,
    pub status: Option<OrderStatus>,
    pub client_id: Option<String>,
    pub product_ids: IndexSet<String>,
}

impl OrderDraft {
    /// `true` when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.supplier_id.is_none()
            && self.total_amount.trim().is_empty()
            && self.status.is_none()
            && self.client_id.is_none()
            && self.product_ids.is_empty()
    }

    /// Select a supplier; a blank identifier clears the selection.
    pub fn set_supplier(&mut self, supplier_id: impl Into<String>) {
        self.supplier_id = non_blank(supplier_id.into());
    }

    pub fn set_total_amount(&mut self, amount: impl Into<String>) {
        self.total_amount = amount.into();
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = Some(status);
    }

    /// Select a client; a blank identifier clears the selection.
    pub fn set_client(&mut self, client_id: impl Into<String>) {
        self.client_id = non_blank(client_id.into());
    }

    /// Toggle a product in the selection. Returns whether it is selected afterwards.
    pub fn toggle_product(&mut self, product_id: &str) -> bool {
        if self.product_ids.shift_remove(product_id) {
            false
        } else {
            self.product_ids.insert(product_id.to_string());
            true
        }
    }

    /// Replace the product selection, ignoring blanks and duplicates.
    pub fn set_products<I, S>(&mut self, product_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_ids = product_ids
            .into_iter()
            .filter_map(|id| non_blank(id.into()))
            .collect();
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
