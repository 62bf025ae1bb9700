use std::future::Future;

use serde_json::Value;

use super::errors::ApiError;
use super::order::ProductLookup;

pub trait OrderApi {
    fn fetch_order(&self, order_id: &str) -> impl Future<Output = Result<Value, ApiError>>;
    fn fetch_product(&self, product_uuid: &str) -> impl Future<Output = ProductLookup>;
}
