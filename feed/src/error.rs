//! Error types for the market data feed

use thiserror::Error;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Market data feed error types
#[derive(Debug, Error)]
pub enum FeedError {
    /// Provider returned an error payload
    #[error("Provider error from {provider}: {message}")]
    ProviderError {
        /// Provider identifier
        provider: String,
        /// Error message
        message: String,
        /// Optional error code from the provider
        code: Option<String>,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded for provider {provider}: {message}")]
    RateLimitExceeded {
        /// Provider identifier
        provider: String,
        /// Error message
        message: String,
    },

    /// Response payload did not match the expected shape
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Endpoint URL error
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl FeedError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FeedError::HttpError(_) | FeedError::RateLimitExceeded { .. }
        )
    }

    /// Check if error is due to rate limiting
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, FeedError::RateLimitExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        let rate_limit_err = FeedError::RateLimitExceeded {
            provider: "yahoo".to_string(),
            message: "too many requests".to_string(),
        };
        assert!(rate_limit_err.is_retryable());
        assert!(rate_limit_err.is_rate_limit());

        let config_err = FeedError::ConfigError("missing endpoint".to_string());
        assert!(!config_err.is_retryable());

        let payload_err = FeedError::InvalidResponse("chart result missing".to_string());
        assert!(!payload_err.is_retryable());
        assert!(!payload_err.is_rate_limit());
    }

    #[test]
    fn test_provider_error_display() {
        let err = FeedError::ProviderError {
            provider: "yahoo".to_string(),
            message: "No data found".to_string(),
            code: Some("Not Found".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("yahoo"));
        assert!(text.contains("No data found"));
    }
}
