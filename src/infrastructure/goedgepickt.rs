use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use crate::domain::errors::ApiError;
use crate::domain::order::{extract_orders, OrderFilters, Product, ProductLookup};
use crate::domain::ports::OrderApi;

pub const DEFAULT_BASE_URL: &str = "https://account.goedgepickt.nl/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CREDENTIAL_PREFIX_LEN: usize = 20;

// ── Client ────────────────────────────────────────────────────────────────────

/// Read-only client for the GoedGepickt REST API.
///
/// Requests are never retried; a failure is reported once and surfaced to
/// the caller.
pub struct GoedGepicktClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoedGepicktClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
    }

    /// GET /orders
    ///
    /// Reachability probe. A 401 still proves the endpoint answers.
    pub async fn test_connection(&self) -> bool {
        let url = format!("{}/orders", self.base_url);
        match self.get(&url).send().await {
            Ok(resp) => matches!(resp.status(), StatusCode::OK | StatusCode::UNAUTHORIZED),
            Err(e) => {
                log::error!("Connection test failed: {}", ApiError::from(e));
                false
            }
        }
    }

    /// GET /orders?{filters}
    pub async fn list_orders(&self, filters: &OrderFilters) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/orders", self.base_url);
        log::debug!("GET {} {:?}", url, filters.query_pairs());

        let resp = self.get(&url).query(&filters.query_pairs()).send().await?;
        let status = resp.status();
        log::debug!("Response status: {}", status);

        match status {
            StatusCode::OK => {
                let body: Value = resp.json().await?;
                let orders = extract_orders(body);
                log::debug!("Listed {} orders", orders.len());
                Ok(orders)
            }
            StatusCode::UNAUTHORIZED => {
                log::error!("GoedGepickt authentication failed, check the API key");
                Err(ApiError::Unauthorized)
            }
            other => {
                let body = resp.text().await.unwrap_or_default();
                log::error!("GoedGepickt API error: {}", other);
                Err(ApiError::Status {
                    status: other.as_u16(),
                    body,
                })
            }
        }
    }

    async fn request_order(&self, url: &str) -> Result<Value, ApiError> {
        let resp = self.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        log::debug!("Status code: {}", status.as_u16());
        log::debug!("Response: {}", body);

        match status {
            StatusCode::OK => {
                let order: Value = serde_json::from_str(&body)
                    .map_err(|e| ApiError::Unexpected(format!("order body is not JSON: {}", e)))?;
                if is_empty_document(&order) {
                    return Err(ApiError::EmptyDocument);
                }
                Ok(order)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            other => Err(ApiError::Status {
                status: other.as_u16(),
                body,
            }),
        }
    }
}

impl OrderApi for GoedGepicktClient {
    /// GET /orders/{order_id}
    async fn fetch_order(&self, order_id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/orders/{}", self.base_url, order_id);
        log::debug!("URL: {}", url);
        log::debug!("Authorization: Bearer {}", credential_prefix(&self.api_key));

        let result = self.request_order(&url).await;
        if let Err(e) = &result {
            report_order_failure(order_id, e);
        }
        result
    }

    /// GET /products/{product_uuid}
    async fn fetch_product(&self, product_uuid: &str) -> ProductLookup {
        let url = format!("{}/products/{}", self.base_url, product_uuid);

        let resp = match self.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = ApiError::from(e);
                log::warn!("Error fetching product {}: {}", product_uuid, err);
                return ProductLookup::Unavailable(err);
            }
        };

        match resp.status() {
            StatusCode::OK => match resp.json::<Product>().await {
                Ok(product) => ProductLookup::Found(product),
                Err(e) => {
                    let err = ApiError::from(e);
                    log::warn!("Error reading product {}: {}", product_uuid, err);
                    ProductLookup::Unavailable(err)
                }
            },
            StatusCode::NOT_FOUND => {
                log::debug!("Product {} not found", product_uuid);
                ProductLookup::NotFound
            }
            other => {
                let body = resp.text().await.unwrap_or_default();
                log::warn!("Product API error: {}", other.as_u16());
                ProductLookup::Unavailable(ApiError::Status {
                    status: other.as_u16(),
                    body,
                })
            }
        }
    }
}

/// `null`, `{}` and `[]` carry no order.
fn is_empty_document(order: &Value) -> bool {
    match order {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// First characters of the credential, enough to tell keys apart in logs.
pub fn credential_prefix(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(CREDENTIAL_PREFIX_LEN).collect();
    format!("{}...", prefix)
}

fn report_order_failure(order_id: &str, err: &ApiError) {
    match err {
        ApiError::Unauthorized => {
            log::error!("Authentication failed. Possible causes:");
            log::error!("  - the API key has expired or is invalid");
            log::error!("  - the API key lacks the required scopes");
            log::error!("  - the API key must be regenerated under Settings > GoedGepickt API");
        }
        ApiError::NotFound => {
            log::error!("Order '{}' not found. Possible causes:", order_id);
            log::error!("  - the order id is incorrect");
            log::error!("  - the order does not exist in this account");
            log::error!("  - the key has no access to this order");
        }
        ApiError::Status { status, body } => {
            log::error!("API error: {}", status);
            log::error!("Response: {}", body);
        }
        ApiError::EmptyDocument => log::error!("Order '{}' came back empty", order_id),
        ApiError::Timeout => log::error!("Request timed out, try again later"),
        ApiError::Connection(msg) => {
            log::error!("Connection error, check the network connection: {}", msg)
        }
        ApiError::Unexpected(msg) => log::error!("Unexpected error: {}", msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_prefix_truncates_long_keys() {
        let key = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(credential_prefix(key), "abcdefghijklmnopqrst...");
    }

    #[test]
    fn credential_prefix_keeps_short_keys() {
        assert_eq!(credential_prefix("short"), "short...");
    }

    #[test]
    fn empty_documents_are_detected() {
        assert!(is_empty_document(&serde_json::json!(null)));
        assert!(is_empty_document(&serde_json::json!({})));
        assert!(is_empty_document(&serde_json::json!([])));
        assert!(!is_empty_document(&serde_json::json!({ "uuid": "abc" })));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = GoedGepicktClient::new("key", "https://example.test/api/v1/").unwrap();
        assert_eq!(client.base_url(), "https://example.test/api/v1");
    }
}
