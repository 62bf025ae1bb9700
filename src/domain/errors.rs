use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed")]
    Unauthorized,
    #[error("Resource not found")]
    NotFound,
    #[error("Response contained no document")]
    EmptyDocument,
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Connection(e.to_string())
        } else {
            ApiError::Unexpected(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_code_and_body() {
        let err = ApiError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 503: maintenance");
    }

    #[test]
    fn unauthorized_display() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Authentication failed");
    }
}
