//! Connectivity check against the GoedGepickt API: probes the orders
//! endpoint, lists a few orders and counts the ones in backorder.
//!
//! Reads the same `GOEDGEPICKT_*` settings as `order_report`.

use dotenvy::dotenv;
use order_report::domain::order::{line_items, OrderFilters};
use order_report::{AppError, Config, GoedGepicktClient};
use serde_json::Value;
use std::process::ExitCode;

const SAMPLE_SIZE: u32 = 5;
const BACKORDER_PAGE_SIZE: u32 = 200;
const BACKORDER_PREVIEW: usize = 3;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env(&[]);
    match check(&config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn check(config: &Config) -> Result<bool, AppError> {
    config.validate()?;
    let client = GoedGepicktClient::new(config.api_key.as_str(), &config.base_url)
        .map_err(|e| AppError::Client(e.to_string()))?;

    if !client.test_connection().await {
        log::error!("Connection to {} failed", client.base_url());
        return Ok(false);
    }
    log::info!("Connection OK");

    let sample = client
        .list_orders(&OrderFilters {
            limit: Some(SAMPLE_SIZE),
            ..Default::default()
        })
        .await?;
    log::info!("Found {} orders", sample.len());
    if let Some(order) = sample.first() {
        log::info!(
            "Sample order {} ({}), status {}, {} products",
            field(order, "uuid"),
            order_number(order),
            field(order, "status"),
            line_items(order).len()
        );
    }

    let backorders = client
        .list_orders(&OrderFilters {
            orderstatus: Some("backorder".to_string()),
            limit: Some(BACKORDER_PAGE_SIZE),
            ..Default::default()
        })
        .await?;
    log::info!("Found {} backorder orders", backorders.len());
    for (idx, order) in backorders.iter().take(BACKORDER_PREVIEW).enumerate() {
        log::info!(
            "  {}. {} ({} products)",
            idx + 1,
            order_number(order),
            line_items(order).len()
        );
    }

    Ok(true)
}

fn field<'a>(order: &'a Value, key: &str) -> &'a str {
    order.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

fn order_number(order: &Value) -> &str {
    order
        .get("orderNumber")
        .or_else(|| order.get("externalDisplayId"))
        .and_then(Value::as_str)
        .unwrap_or("N/A")
}
