use thiserror::Error;

use crate::domain::errors::ApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No API key configured")]
    PlaceholderApiKey,

    #[error("Could not fetch order: {0}")]
    OrderUnavailable(ApiError),

    #[error("Could not build API client: {0}")]
    Client(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::OrderUnavailable(e)
    }
}
