//! Rate limiting
//!
//! This module provides rate limiting functionality to stay inside provider
//! request quotas.

pub mod limiter;

pub use limiter::{RateLimiter, RateLimiterConfig};
