use std::fmt;

use serde::Deserialize;

use super::lenient;

/// Stock counters as reported on a product document.
///
/// `free_stock` is total minus reserved and goes negative when the product
/// is in backorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockRecord {
    #[serde(deserialize_with = "lenient::count")]
    pub total_stock: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub reserved_stock: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub free_stock: i64,
    #[serde(deserialize_with = "lenient::flag")]
    pub unlimited_stock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Unlimited,
    Backorder { shortage: u64 },
    FullyReserved,
    InStock { free: i64 },
    NoStock,
}

/// Classify a stock record. Rules are checked in order and the first match
/// wins.
pub fn classify(stock: &StockRecord) -> StockStatus {
    if stock.unlimited_stock {
        StockStatus::Unlimited
    } else if stock.free_stock < 0 {
        StockStatus::Backorder {
            shortage: stock.free_stock.unsigned_abs(),
        }
    } else if stock.free_stock == 0 && stock.total_stock > 0 {
        StockStatus::FullyReserved
    } else if stock.free_stock > 0 {
        StockStatus::InStock {
            free: stock.free_stock,
        }
    } else {
        StockStatus::NoStock
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Unlimited => write!(f, "unlimited stock"),
            StockStatus::Backorder { shortage } => write!(f, "in backorder, {} short", shortage),
            StockStatus::FullyReserved => write!(f, "in stock, fully reserved"),
            StockStatus::InStock { free } => write!(f, "in stock, {} free", free),
            StockStatus::NoStock => write!(f, "no stock"),
        }
    }
}
