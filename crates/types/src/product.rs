//! Product catalogue write bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /Product` and `PUT /Product/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Purchase price.
    pub price: f64,
    pub price_for_sale: f64,
    pub quantity: u32,
    #[serde(rename = "categoryID")]
    pub category_id: String,
    /// Expiry date, sent as `YYYY-MM-DD`.
    pub date_exp: NaiveDate,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_input_uses_back_office_field_names() {
        let input = ProductInput {
            name: "Huile d'argan".into(),
            description: String::new(),
            price: 8.5,
            price_for_sale: 12.0,
            quantity: 40,
            category_id: "CAT1".into(),
            date_exp: NaiveDate::from_ymd_opt(2027, 3, 1).expect("valid date"),
        };

        assert_eq!(
            serde_json::to_value(&input).expect("serialize product"),
            json!({
                "name": "Huile d'argan",
                "description": "",
                "price": 8.5,
                "priceForSale": 12.0,
                "quantity": 40,
                "categoryID": "CAT1",
                "dateExp": "2027-03-01"
            })
        );
    }
}
