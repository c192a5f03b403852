//! Product service calls beyond the reference listing: catalogue lookups,
//! catalogue edits and stock movements.
//!
//! Responses are kept as raw JSON; the CLI prints them as-is. Calls the back
//! office answers with an empty body resolve to `Value::Null`.

use reqwest::Method;
use serde_json::{Value, json};
use yousmala_types::ProductInput;

use crate::{ApiError, BackOfficeClient, PRODUCTS_PATH};

const PRODUCT_SEGMENT: &str = "Product";

impl BackOfficeClient {
    /// `GET /Product/{id}`
    pub async fn get_product(&self, product_id: &str) -> Result<Value, ApiError> {
        let builder = self.request_segments(Method::GET, &[PRODUCT_SEGMENT, product_id])?;
        self.send_json(builder).await
    }

    /// `GET /Product/{id}/stock`
    pub async fn check_stock(&self, product_id: &str) -> Result<Value, ApiError> {
        let builder = self.request_segments(Method::GET, &[PRODUCT_SEGMENT, product_id, "stock"])?;
        self.send_json(builder).await
    }

    /// `GET /Product/{id}/availability?desiredQuantity=n`
    pub async fn check_availability(&self, product_id: &str, desired_quantity: u32) -> Result<Value, ApiError> {
        let builder = self
            .request_segments(Method::GET, &[PRODUCT_SEGMENT, product_id, "availability"])?
            .query(&[("desiredQuantity", desired_quantity)]);
        self.send_json(builder).await
    }

    /// `GET /Product/expiring-soon`: products expiring within a month.
    pub async fn products_expiring_soon(&self) -> Result<Vec<Value>, ApiError> {
        let builder = self.request_segments(Method::GET, &[PRODUCT_SEGMENT, "expiring-soon"])?;
        self.send_json(builder).await
    }

    /// `POST /Product`
    pub async fn create_product(&self, product: &ProductInput) -> Result<Value, ApiError> {
        self.post_json(PRODUCTS_PATH, product).await
    }

    /// `PUT /Product/{id}` with the full product body.
    pub async fn update_product(&self, product_id: &str, product: &ProductInput) -> Result<Value, ApiError> {
        let builder = self.request_segments(Method::PUT, &[PRODUCT_SEGMENT, product_id])?.json(product);
        self.send_json(builder).await
    }

    /// `DELETE /Product/{id}`
    pub async fn delete_product(&self, product_id: &str) -> Result<Value, ApiError> {
        let builder = self.request_segments(Method::DELETE, &[PRODUCT_SEGMENT, product_id])?;
        self.send_json(builder).await
    }

    /// `POST /Product/{id}/sell`: take `quantity` units out of stock.
    pub async fn sell_product(&self, product_id: &str, quantity: u32) -> Result<Value, ApiError> {
        self.post_product_action(product_id, "sell", json!({ "quantity": quantity })).await
    }

    /// `POST /Product/{id}/purchase`: add `quantity` bought units to stock.
    pub async fn purchase_product(&self, product_id: &str, quantity: u32) -> Result<Value, ApiError> {
        self.post_product_action(product_id, "purchase", json!({ "quantity": quantity })).await
    }

    /// `POST /Product/{id}/update-stock`: overwrite the stock level.
    pub async fn update_stock(&self, product_id: &str, new_stock_quantity: u32) -> Result<Value, ApiError> {
        let body = json!({ "newStockQuantity": new_stock_quantity });
        self.post_product_action(product_id, "update-stock", body).await
    }

    /// `POST /Product/auto-reorder`: reorder every product below the threshold.
    pub async fn auto_reorder(&self, threshold_quantity: u32) -> Result<Value, ApiError> {
        let builder = self
            .request_segments(Method::POST, &[PRODUCT_SEGMENT, "auto-reorder"])?
            .json(&json!({ "thresholdQuantity": threshold_quantity }));
        self.send_json(builder).await
    }

    async fn post_product_action(&self, product_id: &str, action: &str, body: Value) -> Result<Value, ApiError> {
        let builder = self
            .request_segments(Method::POST, &[PRODUCT_SEGMENT, product_id, action])?
            .json(&body);
        self.send_json(builder).await
    }
}
