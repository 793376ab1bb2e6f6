//! Market data providers
//!
//! This module defines the MarketDataProvider trait that all provider-specific
//! implementations must implement. It provides a uniform interface for
//! fetching intraday bars from different data sources.

use async_trait::async_trait;

use crate::bars::{BarRequest, ProviderId, RawBar};
use crate::error::FeedResult;
use crate::ratelimit::RateLimiterConfig;

pub mod yahoo;

pub use yahoo::YahooChartProvider;

/// Market data provider trait
///
/// Provider implementations wrap one long-lived session handle that is not
/// assumed to be thread-safe; methods take `&mut self` so exclusive access is
/// enforced by the type system rather than by locks. Acquire the provider
/// once and reuse it across fetches.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the provider identifier
    fn provider_id(&self) -> ProviderId;

    /// Fetch raw bars for the requested instrument, interval and range
    ///
    /// # Returns
    /// * `Ok(bars)` - Raw rows as delivered by the provider; an empty vec is
    ///   the explicit empty-result indicator, not an error
    /// * `Err(FeedError)` - The request itself failed
    async fn fetch_bars(&mut self, request: &BarRequest) -> FeedResult<Vec<RawBar>>;

    /// Check if the provider is healthy and reachable
    ///
    /// # Returns
    /// * `Ok(true)` - Provider is reachable
    /// * `Ok(false)` - Provider is unreachable
    /// * `Err(FeedError)` - Health check failed
    async fn health_check(&mut self) -> FeedResult<bool>;
}

/// Provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier
    pub provider_id: ProviderId,

    /// Base endpoint URL
    pub endpoint: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Request quota for this provider
    pub rate_limit: RateLimiterConfig,
}

impl ProviderConfig {
    /// Create a new provider configuration
    pub fn new(provider_id: ProviderId, endpoint: impl Into<String>) -> Self {
        Self {
            provider_id,
            endpoint: endpoint.into(),
            user_agent: default_user_agent(),
            timeout_secs: 30,
            rate_limit: RateLimiterConfig::default(),
        }
    }

    /// Default configuration for the public Yahoo chart API
    pub fn yahoo_default() -> Self {
        Self::new(ProviderId::new("yahoo"), yahoo::DEFAULT_ENDPOINT)
            .with_rate_limit(RateLimiterConfig::yahoo_default())
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the request quota
    pub fn with_rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

fn default_user_agent() -> String {
    format!("sigkit/{}", env!("CARGO_PKG_VERSION"))
}
