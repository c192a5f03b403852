//! Yousmala back office API client.
//!
//! This crate provides a lightweight client for the back office REST API.
//! It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Resolving and validating the base URL from `YOUSMALA_API_BASE`
//! - Building requests with a consistent User-Agent and Accept headers
//! - Decoding the reference collections and creating orders
//!
//! The primary entry point is [`BackOfficeClient`]. Front ends depend on the
//! [`BackOfficeApi`] trait so the order workflow can run against a test double.
//!
//! # Example
//!
//! ```ignore
//! use yousmala_api::{ApiConfig, BackOfficeApi, BackOfficeClient};
//!
//! async fn suppliers() -> Result<(), yousmala_api::ApiError> {
//!     let client = BackOfficeClient::new(&ApiConfig::from_env())?;
//!     for supplier in client.list_suppliers().await? {
//!         println!("{}", supplier.name);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod products;

pub use config::{API_BASE_ENV, API_TIMEOUT_ENV, ApiConfig, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use error::ApiError;

use std::env;

use reqwest::{Client, Method, RequestBuilder, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use yousmala_types::{Client as ClientRecord, OrderPayload, Product, Supplier};
use yousmala_util::summarize_http_failure;

pub const SUPPLIERS_PATH: &str = "/Supplier";
pub const CLIENTS_PATH: &str = "/Client";
pub const PRODUCTS_PATH: &str = "/Product";
pub const ORDERS_PATH: &str = "/Order";

/// Operations the order entry workflow needs from the back office.
#[async_trait::async_trait]
pub trait BackOfficeApi: Send + Sync {
    /// `GET /Supplier`
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError>;

    /// `GET /Client`
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, ApiError>;

    /// `GET /Product`
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `POST /Order`, returning the created order as the server echoes it.
    async fn create_order(&self, order: &OrderPayload) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for back office access.
///
/// The client pre-configures default headers and builds requests against a
/// validated base URL.
pub struct BackOfficeClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl BackOfficeClient {
    /// Construct a [`BackOfficeClient`] from an [`ApiConfig`].
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
            user_agent: format!("yousmala/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Construct a client from `YOUSMALA_API_BASE` / `YOUSMALA_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ApiConfig::from_env())
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http.request(method, url).header(header::USER_AGENT, &self.user_agent)
    }

    /// Build a request whose path is made of individually percent-encoded
    /// segments, for paths that embed identifiers.
    pub fn request_segments(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|error| ApiError::InvalidBaseUrl {
            base: self.base_url.clone(),
            reason: error.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                base: self.base_url.clone(),
                reason: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        debug!(url = %url, "building request");

        Ok(self.http.request(method, url).header(header::USER_AGENT, &self.user_agent))
    }

    /// `GET` a path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, path)).await
    }

    /// `POST` a JSON body to a path and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body)).await
    }

    /// Send a prepared request and decode its body.
    ///
    /// Non-2xx answers become [`ApiError::Status`] with a redacted summary of
    /// the body. An empty success body decodes as JSON `null`.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|source| ApiError::Network {
            url: source.url().map(|url| url.to_string()).unwrap_or_default(),
            source,
        })?;

        let url = response.url().to_string();
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Network { url: url.clone(), source })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                summary: summarize_http_failure(status.as_u16(), &text),
            });
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait::async_trait]
impl BackOfficeApi for BackOfficeClient {
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.get_json(SUPPLIERS_PATH).await
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, ApiError> {
        self.get_json(CLIENTS_PATH).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(PRODUCTS_PATH).await
    }

    async fn create_order(&self, order: &OrderPayload) -> Result<Value, ApiError> {
        self.post_json(ORDERS_PATH, order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use yousmala_types::OrderStatus;

    fn client_for(server: &MockServer) -> BackOfficeClient {
        BackOfficeClient::new(&ApiConfig::default().with_base_url(server.uri())).expect("client builds")
    }

    #[tokio::test]
    async fn lists_suppliers_from_back_office() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Supplier"))
            .and(header_matcher("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"supplierId": "S1", "name": "Coton Sud"},
                {"supplierId": "S2", "name": "Filature Atlas"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let suppliers = client_for(&server).list_suppliers().await.expect("suppliers load");
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[1].name, "Filature Atlas");
    }

    #[tokio::test]
    async fn create_order_posts_camel_case_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Order"))
            .and(body_json(json!({
                "supplierId": "S1",
                "totalAmount": 100.0,
                "status": "En attente",
                "clientId": "C1",
                "productIds": ["P1", "P2"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"orderId": "O1"})))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_order(&OrderPayload {
                supplier_id: "S1".into(),
                total_amount: 100.0,
                status: OrderStatus::Pending,
                client_id: "C1".into(),
                product_ids: vec!["P1".into(), "P2".into()],
            })
            .await
            .expect("order created");
        assert_eq!(created, json!({"orderId": "O1"}));
    }

    #[tokio::test]
    async fn empty_success_body_decodes_as_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Order"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let created: Value = client_for(&server)
            .post_json(ORDERS_PATH, &json!({}))
            .await
            .expect("empty body accepted");
        assert_eq!(created, Value::Null);
    }

    #[tokio::test]
    async fn failure_status_is_summarised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Client"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})))
            .mount(&server)
            .await;

        let error = client_for(&server).list_clients().await.expect_err("server error surfaces");
        assert_eq!(error.status(), Some(500));
        assert!(error.to_string().contains("database unavailable"), "error: {}", error);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Product"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let error = client_for(&server).list_products().await.expect_err("html is not json");
        assert!(matches!(error, ApiError::Decode { .. }), "error: {:?}", error);
    }
}
