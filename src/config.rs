use std::path::PathBuf;

use crate::errors::AppError;
use crate::infrastructure::goedgepickt::DEFAULT_BASE_URL;

pub const DEFAULT_ORDER_ID: &str = "802b2103-9695-41ff-a7a2-60fe6b87e466";
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub order_id: String,
    pub api_key: String,
    pub base_url: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Resolve settings from positional args (`[order_id] [api_key]`), then
    /// `env`, then defaults. `args` excludes the program name.
    pub fn resolve<F>(args: &[String], env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let order_id = args
            .first()
            .cloned()
            .or_else(|| env("GOEDGEPICKT_ORDER_ID"))
            .unwrap_or_else(|| DEFAULT_ORDER_ID.to_string());
        let api_key = args
            .get(1)
            .cloned()
            .or_else(|| env("GOEDGEPICKT_API_KEY"))
            .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string());
        let base_url = env("GOEDGEPICKT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let output_dir = env("ORDER_REPORT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            order_id,
            api_key,
            base_url,
            output_dir,
        }
    }

    pub fn from_env(args: &[String]) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Refuse to run with the placeholder key.
    pub fn validate(&self) -> Result<(), AppError> {
        let key = self.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(AppError::PlaceholderApiKey);
        }
        Ok(())
    }
}
