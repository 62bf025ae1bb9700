use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::AppError;

pub fn order_file_name(order_id: &str) -> String {
    format!("order_{}.json", order_id)
}

/// Write the order document, pretty-printed, to `dir/order_<id>.json`.
pub fn save_order(dir: &Path, order_id: &str, order: &Value) -> Result<PathBuf, AppError> {
    let path = dir.join(order_file_name(order_id));
    let mut body = serde_json::to_string_pretty(order)?;
    body.push('\n');
    fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_name_uses_order_id() {
        assert_eq!(order_file_name("abc-123"), "order_abc-123.json");
    }

    #[test]
    fn saved_file_round_trips_and_keeps_unicode() {
        let dir = std::env::temp_dir().join(format!("order_file_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        let order = json!({ "uuid": "abc", "customerName": "Zoë Müller", "products": [] });
        let path = save_order(&dir, "abc", &order).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Zoë Müller"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, order);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = std::env::temp_dir().join(format!("missing_{}", uuid::Uuid::new_v4()));
        let err = save_order(&dir, "abc", &json!({})).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
