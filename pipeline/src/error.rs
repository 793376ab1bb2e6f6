//! Error types for the signal pipeline

use thiserror::Error;

use sig_feed::FeedError;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No usable bars after fetching and normalization
    #[error("No usable bars in the requested range")]
    NoData,

    /// Too few bars to compute the oscillator
    #[error("Insufficient data: have {have} bars, need {need}")]
    InsufficientData {
        /// Bars available
        have: usize,
        /// Bars required
        need: usize,
    },

    /// Bars were fetched but none fall inside the trading session
    #[error("Market closed: no bars inside the trading session")]
    MarketClosed,

    /// Market data provider failed
    #[error("Provider error: {0}")]
    ProviderError(#[from] FeedError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PipelineError {
    /// Check if the failure means the market was simply closed
    pub fn is_market_closed(&self) -> bool {
        matches!(self, PipelineError::MarketClosed)
    }

    /// Check if the failure is a data-volume problem rather than a fault
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            PipelineError::InsufficientData { .. } | PipelineError::NoData
        )
    }

    /// Check if the failure came from the provider side
    pub fn is_provider(&self) -> bool {
        matches!(self, PipelineError::ProviderError(_))
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(PipelineError::MarketClosed.is_market_closed());
        assert!(!PipelineError::MarketClosed.is_insufficient_data());

        let thin = PipelineError::InsufficientData { have: 10, need: 20 };
        assert!(thin.is_insufficient_data());
        assert!(!thin.is_market_closed());

        assert!(PipelineError::NoData.is_insufficient_data());

        let provider =
            PipelineError::ProviderError(FeedError::ConfigError("bad endpoint".to_string()));
        assert!(provider.is_provider());
        assert!(!provider.is_insufficient_data());
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = PipelineError::InsufficientData { have: 10, need: 20 };
        assert_eq!(err.to_string(), "Insufficient data: have 10 bars, need 20");
    }
}
