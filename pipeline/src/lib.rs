//! # sig-pipeline: Intraday Bar Pipeline and MACD Crossover Signals
//!
//! This library turns raw intraday index bars into a resampled OHLCV series,
//! a MACD oscillator, and discrete buy/sell crossover events.
//!
//! ## Core Components
//!
//! - **SignalEngine**: Orchestrates fetch, normalize, filter, resample,
//!   oscillator and strategy into one snapshot per run
//! - **Normalizer / Session Filter / Resampler**: Pure stages from raw rows
//!   to a dense, wall-clock-aligned bar series
//! - **MACD Engine**: Recursive EMA oscillator with a data-volume floor
//! - **Crossover Strategies**: Zero-line event accumulation or point-in-time
//!   signal-line comparison behind one interface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sig_feed::providers::YahooChartProvider;
//! use sig_pipeline::{PipelineConfig, SignalEngine};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = PipelineConfig::default();
//!     let provider = YahooChartProvider::with_defaults().unwrap();
//!     let mut engine = SignalEngine::new(provider, config);
//!
//!     match engine.run().await {
//!         Ok(snapshot) => {
//!             println!(
//!                 "{} @ {:.2} trend {}",
//!                 snapshot.latest.timestamp, snapshot.latest.price, snapshot.latest.trend
//!             );
//!             for event in &snapshot.events {
//!                 println!("{} at position {}", event.kind, event.position);
//!             }
//!         }
//!         Err(e) => eprintln!("pipeline failed: {}", e),
//!     }
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod normalize;
pub mod resample;
pub mod session;
pub mod signals;
pub mod types;

// Re-export main types
pub use config::PipelineConfig;
pub use engine::SignalEngine;
pub use error::{PipelineError, PipelineResult};
pub use indicators::macd::{macd, MacdParams, MacdSeries};
pub use normalize::normalize;
pub use resample::resample;
pub use session::{filter_session, TradingSession};
pub use signals::crossover::{
    CrossoverReport, CrossoverStrategy, SignalLineStrategy, StrategyKind, ZeroLineStrategy,
};
pub use types::{
    Bar, LatestReading, OscillatorPoint, ResampledBar, SignalEvent, SignalKind, Snapshot, Trend,
};
