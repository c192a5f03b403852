//! Read-only reference records used to populate selection inputs.
//!
//! The back office serves each collection with its own field naming
//! (`supplierId`, `clientID`, `productID`), so every record carries explicit
//! serde renames rather than a blanket `rename_all`.

use serde::{Deserialize, Serialize};

/// Common accessors for records offered in a selector.
pub trait ReferenceRecord {
    /// Identifier submitted with the order.
    fn id(&self) -> &str;

    /// Human-readable text shown in the selector.
    fn label(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub firstname: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub name: String,
}

impl ReferenceRecord for Supplier {
    fn id(&self) -> &str {
        &self.supplier_id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl ReferenceRecord for Client {
    fn id(&self) -> &str {
        &self.client_id
    }

    fn label(&self) -> String {
        format!("{} {}", self.firstname, self.last_name)
    }
}

impl ReferenceRecord for Product {
    fn id(&self) -> &str {
        &self.product_id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
