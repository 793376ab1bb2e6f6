//! # sig-feed: Market Data Feed for Intraday Bars
//!
//! This library provides the market data side of the sigkit pipeline: typed
//! instrument identifiers, raw bar types, and provider adapters that fetch
//! intraday OHLCV rows over HTTP.
//!
//! ## Core Components
//!
//! - **MarketDataProvider**: Trait for provider-specific API implementations
//! - **YahooChartProvider**: Adapter for the public Yahoo Finance chart API
//! - **BarRequest / RawBar**: Provider-agnostic request and wire-row types
//! - **Rate Limiting**: Token bucket enforcement of provider request quotas
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use sig_feed::{BarInterval, BarRequest, ExchangeId, InstrumentId};
//! use sig_feed::providers::{MarketDataProvider, ProviderConfig, YahooChartProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ProviderConfig::yahoo_default();
//!     let mut provider = YahooChartProvider::new(config).unwrap();
//!
//!     let request = BarRequest::lookback(
//!         InstrumentId::new("^NSEI"),
//!         ExchangeId::new("NSE"),
//!         BarInterval::Min5,
//!         5,
//!         Utc::now(),
//!     );
//!
//!     match provider.fetch_bars(&request).await {
//!         Ok(bars) => println!("fetched {} raw rows", bars.len()),
//!         Err(e) => eprintln!("fetch failed: {}", e),
//!     }
//! }
//! ```

pub mod bars;
pub mod error;
pub mod providers;
pub mod ratelimit;

// Re-export main types
pub use bars::{
    BarInterval, BarRequest, ExchangeId, InstrumentId, ProviderId, RawBar, RawTimestamp,
};
pub use error::{FeedError, FeedResult};
pub use providers::{MarketDataProvider, ProviderConfig, YahooChartProvider};
pub use ratelimit::{RateLimiter, RateLimiterConfig};

// Initialize tracing
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}
