use std::io::Write;
use std::path::{Path, PathBuf};

use crate::application::report::ReportFormatter;
use crate::domain::ports::OrderApi;
use crate::errors::AppError;
use crate::infrastructure::order_file::save_order;

/// Fetch one order, write its stock report to `out` and save the raw
/// document under `output_dir`.
///
/// A failed order fetch aborts before any product is looked up.
pub async fn run<A, W>(
    api: &A,
    order_id: &str,
    output_dir: &Path,
    out: &mut W,
) -> Result<PathBuf, AppError>
where
    A: OrderApi,
    W: Write,
{
    log::info!("Fetching order {}", order_id);
    let order = api.fetch_order(order_id).await?;

    ReportFormatter::new(api).render(&order, out).await?;
    out.flush()?;

    let path = save_order(output_dir, order_id, &order)?;
    log::info!("Order data saved to {}", path.display());
    Ok(path)
}
