use serde::Deserialize;
use serde_json::Value;

use super::errors::ApiError;
use super::lenient;
use super::stock::StockRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType {
    Normal,
    Parent,
    Child,
    Other(String),
}

impl LineType {
    pub fn as_str(&self) -> &str {
        match self {
            LineType::Normal => "normal",
            LineType::Parent => "parent",
            LineType::Child => "child",
            LineType::Other(tag) => tag,
        }
    }
}

impl From<Option<&Value>> for LineType {
    fn from(tag: Option<&Value>) -> Self {
        match tag {
            None | Some(Value::Null) => LineType::Normal,
            Some(Value::String(tag)) => match tag.as_str() {
                "normal" => LineType::Normal,
                "parent" => LineType::Parent,
                "child" => LineType::Child,
                other => LineType::Other(other.to_string()),
            },
            Some(other) => LineType::Other(other.to_string()),
        }
    }
}

/// The fields of an order's `products` entry that the report reads.
///
/// Scalars are kept as display text so a field of an unexpected type is
/// still shown rather than losing the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub sku: String,
    pub line_type: LineType,
    pub product_uuid: Option<String>,
    pub quantity: String,
    pub picked: String,
}

impl LineItem {
    pub fn from_value(entry: &Value) -> Self {
        let field = |key: &str| lenient::text(entry.get(key));

        Self {
            name: field("productName").unwrap_or_else(|| "N/A".to_string()),
            sku: field("sku").unwrap_or_else(|| "N/A".to_string()),
            line_type: LineType::from(entry.get("type")),
            product_uuid: field("productUuid").filter(|uuid| !uuid.is_empty()),
            quantity: field("productQuantity").unwrap_or_else(|| "0".to_string()),
            picked: field("pickedQuantity").unwrap_or_else(|| "0".to_string()),
        }
    }
}

/// Project the `products` sequence of an order document, keeping order.
/// Every entry yields a line; fields that are missing fall back to defaults.
pub fn line_items(order: &Value) -> Vec<LineItem> {
    let Some(entries) = order.get("products").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries.iter().map(LineItem::from_value).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::object")]
    pub stock: Option<StockRecord>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub allow_backorders: bool,
}

/// Outcome of a product lookup. A missing product is not a failure.
#[derive(Debug)]
pub enum ProductLookup {
    Found(Product),
    NotFound,
    Unavailable(ApiError),
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub status: Option<String>,
    pub orderstatus: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub page: Option<u32>,
}

impl OrderFilters {
    /// Query pairs in the order the API expects them. `limit` is sent as
    /// both `limit` and `per_page`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(orderstatus) = &self.orderstatus {
            pairs.push(("orderstatus", orderstatus.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
            pairs.push(("per_page", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

/// Unwrap an order listing. The API answers with a bare array or with the
/// array nested under `items`, `orders` or `data`.
pub fn extract_orders(body: Value) -> Vec<Value> {
    match body {
        Value::Array(orders) => orders,
        Value::Object(mut map) => {
            for key in ["items", "orders", "data"] {
                if let Some(Value::Array(orders)) = map.remove(key) {
                    return orders;
                }
            }
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            log::warn!("Unrecognised order list shape, keys: {:?}", keys);
            Vec::new()
        }
        other => {
            log::warn!("Unrecognised order list shape: {}", other);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_items_keep_order_and_defaults() {
        let order = json!({
            "uuid": "abc",
            "products": [
                {
                    "productName": "Gift box",
                    "sku": "GB-1",
                    "type": "parent",
                    "productUuid": "p-1",
                    "productQuantity": 2,
                    "pickedQuantity": 1
                },
                { "type": "child", "productUuid": "" },
                { "productName": null, "extra": true }
            ]
        });

        let items = line_items(&order);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].name, "Gift box");
        assert_eq!(items[0].line_type, LineType::Parent);
        assert_eq!(items[0].product_uuid.as_deref(), Some("p-1"));
        assert_eq!((items[0].quantity.as_str(), items[0].picked.as_str()), ("2", "1"));

        assert_eq!(items[1].name, "N/A");
        assert_eq!(items[1].sku, "N/A");
        assert_eq!(items[1].line_type, LineType::Child);
        assert_eq!(items[1].product_uuid, None);

        assert_eq!(items[2].name, "N/A");
        assert_eq!(items[2].line_type, LineType::Normal);
        assert_eq!((items[2].quantity.as_str(), items[2].picked.as_str()), ("0", "0"));
    }

    #[test]
    fn missing_products_key_yields_no_items() {
        assert!(line_items(&json!({ "uuid": "abc" })).is_empty());
        assert!(line_items(&json!({ "products": "nope" })).is_empty());
    }

    #[test]
    fn off_type_fields_keep_the_line() {
        let order = json!({
            "products": [{
                "productName": "Mug",
                "sku": 12345,
                "productUuid": "p",
                "productQuantity": 2.0,
                "pickedQuantity": null
            }]
        });

        let items = line_items(&order);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Mug");
        assert_eq!(items[0].sku, "12345");
        assert_eq!(items[0].quantity, "2.0");
        assert_eq!(items[0].picked, "0");
        assert_eq!(items[0].product_uuid.as_deref(), Some("p"));
    }

    #[test]
    fn non_object_entries_render_with_defaults() {
        let order = json!({ "products": [42, { "sku": "A" }] });
        let items = line_items(&order);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "N/A");
        assert_eq!(items[0].product_uuid, None);
        assert_eq!(items[1].sku, "A");
    }

    #[test]
    fn unknown_type_tag_is_kept_verbatim() {
        assert_eq!(LineType::from(Some(&json!("bundle"))).as_str(), "bundle");
        assert_eq!(LineType::from(Some(&json!(null))), LineType::Normal);
    }

    #[test]
    fn product_without_stock_parses() {
        let product: Product = serde_json::from_value(json!({ "uuid": "p-1" })).unwrap();
        assert!(product.stock.is_none());
        assert!(!product.allow_backorders);
    }

    #[test]
    fn product_with_null_flag_keeps_its_stock() {
        let product: Product = serde_json::from_value(json!({
            "allowBackorders": null,
            "stock": {
                "totalStock": 5,
                "reservedStock": 5,
                "freeStock": 0,
                "unlimitedStock": false
            }
        }))
        .unwrap();

        assert!(!product.allow_backorders);
        let stock = product.stock.unwrap();
        assert_eq!((stock.total_stock, stock.free_stock), (5, 0));
    }

    #[test]
    fn product_with_non_object_stock_has_no_stock() {
        let product: Product =
            serde_json::from_value(json!({ "stock": [], "allowBackorders": 1 })).unwrap();
        assert!(product.stock.is_none());
        assert!(product.allow_backorders);
    }

    #[test]
    fn filters_send_limit_twice() {
        let filters = OrderFilters {
            orderstatus: Some("backorder".to_string()),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("orderstatus", "backorder".to_string()),
                ("limit", "5".to_string()),
                ("per_page", "5".to_string()),
            ]
        );
    }

    #[test]
    fn extract_orders_accepts_known_shapes() {
        assert_eq!(extract_orders(json!([{ "a": 1 }])).len(), 1);
        assert_eq!(extract_orders(json!({ "items": [1, 2] })).len(), 2);
        assert_eq!(extract_orders(json!({ "orders": [1] })).len(), 1);
        assert_eq!(
            extract_orders(json!({ "data": [1, 2, 3], "pageInfo": {} })).len(),
            3
        );
    }

    #[test]
    fn extract_orders_rejects_unknown_shapes() {
        assert!(extract_orders(json!({ "results": [1] })).is_empty());
        assert!(extract_orders(json!("text")).is_empty());
    }
}
