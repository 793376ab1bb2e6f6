//! Rate limiting implementation
//!
//! Token bucket limiter guarding outbound provider requests. Public market
//! data endpoints throttle aggressively by IP, so the defaults here are
//! deliberately conservative.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovRateLimiter};
use nonzero_ext::nonzero;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::bars::ProviderId;
use crate::error::{FeedError, FeedResult};

/// Rate limiter for provider requests
pub struct RateLimiter {
    provider_id: ProviderId,
    limiter: DefaultDirectRateLimiter,
    requests_per_second: u32,
    burst_size: u32,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// Zero values are lifted to one request; a limiter that can never grant
    /// a permit would deadlock every fetch.
    pub fn new(provider_id: ProviderId, requests_per_second: u32, burst_size: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
        let burst = NonZeroU32::new(burst_size).unwrap_or(nonzero!(1u32));
        let quota = Quota::per_second(rate).allow_burst(burst);

        Self {
            provider_id,
            limiter: GovRateLimiter::direct(quota),
            requests_per_second: rate.get(),
            burst_size: burst.get(),
        }
    }

    /// Check if a request is allowed and wait if necessary
    ///
    /// This method will block until the rate limit allows the request.
    pub async fn check(&self) -> FeedResult<()> {
        match self.limiter.check() {
            Ok(_) => Ok(()),
            Err(_) => {
                // Wait for the next available slot
                self.limiter.until_ready().await;
                Ok(())
            }
        }
    }

    /// Try to acquire permission without waiting
    ///
    /// # Returns
    /// * `Ok(())` - Permission granted
    /// * `Err(FeedError::RateLimitExceeded)` - Rate limit exceeded
    pub fn try_check(&self) -> FeedResult<()> {
        self.limiter
            .check()
            .map_err(|_| FeedError::RateLimitExceeded {
                provider: self.provider_id.to_string(),
                message: format!(
                    "Rate limit exceeded: {} requests/sec, burst {}",
                    self.requests_per_second, self.burst_size
                ),
            })
    }

    /// Get provider ID
    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    /// Get requests per second limit
    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second
    }

    /// Get burst size
    pub fn burst_size(&self) -> u32 {
        self.burst_size
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Requests per second
    pub requests_per_second: u32,
    /// Burst capacity
    pub burst_size: u32,
}

impl RateLimiterConfig {
    /// Create a new rate limiter configuration
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Default configuration for the Yahoo chart endpoint
    pub fn yahoo_default() -> Self {
        Self {
            requests_per_second: 2,
            burst_size: 5,
        }
    }

    /// Build a rate limiter with this configuration
    pub fn build(&self, provider_id: ProviderId) -> RateLimiter {
        RateLimiter::new(provider_id, self.requests_per_second, self.burst_size)
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::yahoo_default()
    }
}
