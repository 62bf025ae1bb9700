use std::io::{self, Write};

use serde_json::Value;

use crate::domain::order::{line_items, LineItem, LineType, ProductLookup};
use crate::domain::ports::OrderApi;
use crate::domain::stock::classify;

const BANNER_WIDTH: usize = 60;
const ITEM_RULE_WIDTH: usize = 50;

/// Renders an order and the live stock of each of its lines.
pub struct ReportFormatter<'a, A> {
    api: &'a A,
}

impl<'a, A: OrderApi> ReportFormatter<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn render<W: Write>(&self, order: &Value, out: &mut W) -> io::Result<()> {
        let banner = "=".repeat(BANNER_WIDTH);

        writeln!(out)?;
        writeln!(out, "{}", banner)?;
        writeln!(out, "RAW ORDER RESPONSE")?;
        writeln!(out, "{}", banner)?;
        writeln!(out, "{}", serde_json::to_string_pretty(order)?)?;
        writeln!(out, "{}", banner)?;

        writeln!(out)?;
        writeln!(out, "{}", banner)?;
        writeln!(out, "PRODUCT STOCK & BACKORDER STATUS")?;
        writeln!(out, "{}", banner)?;

        for item in line_items(order) {
            self.render_item(&item, out).await?;
        }

        writeln!(out)?;
        writeln!(out, "{}", banner)?;
        writeln!(out)?;
        Ok(())
    }

    async fn render_item<W: Write>(&self, item: &LineItem, out: &mut W) -> io::Result<()> {
        let indent = if item.line_type == LineType::Child { "  " } else { "" };
        let type_label = match &item.line_type {
            LineType::Normal => String::new(),
            other => format!(" [{}]", other.as_str()),
        };

        writeln!(out)?;
        writeln!(out, "{}{}", indent, "=".repeat(ITEM_RULE_WIDTH))?;
        writeln!(out, "{}{}{}", indent, item.name, type_label)?;
        writeln!(out, "{}SKU: {}", indent, item.sku)?;
        writeln!(out, "{}Ordered: {} | Picked: {}", indent, item.quantity, item.picked)?;

        let Some(product_uuid) = item.product_uuid.as_deref() else {
            writeln!(out, "{}no product reference available", indent)?;
            return Ok(());
        };

        let product = match self.api.fetch_product(product_uuid).await {
            ProductLookup::Found(product) => product,
            ProductLookup::NotFound | ProductLookup::Unavailable(_) => {
                writeln!(out, "{}no stock information available", indent)?;
                return Ok(());
            }
        };
        let Some(stock) = product.stock else {
            writeln!(out, "{}no stock information available", indent)?;
            return Ok(());
        };

        writeln!(out, "{}{}", indent, classify(&stock))?;
        writeln!(out, "{}Stock details:", indent)?;
        writeln!(out, "{}  total: {}", indent, stock.total_stock)?;
        writeln!(out, "{}  reserved: {}", indent, stock.reserved_stock)?;
        writeln!(out, "{}  free: {}", indent, stock.free_stock)?;
        writeln!(
            out,
            "{}  backorders allowed: {}",
            indent,
            if product.allow_backorders { "yes" } else { "no" }
        )?;
        Ok(())
    }
}
