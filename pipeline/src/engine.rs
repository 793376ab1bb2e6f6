//! Pipeline orchestration
//!
//! One engine owns one provider handle and one configuration, and turns a
//! single fetch into a complete snapshot: fetch, normalize, session-filter,
//! resample, oscillator, strategy, assemble. Every stage either succeeds or
//! the run fails as a whole; no partial snapshot is ever produced.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use sig_feed::{BarRequest, MarketDataProvider};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::indicators::macd::macd;
use crate::normalize::normalize;
use crate::resample::resample;
use crate::session::filter_session;
use crate::types::{LatestReading, OscillatorPoint, Snapshot};

/// Signal engine driving one provider through the pipeline stages
///
/// The provider is injected at construction and owned by the engine; methods
/// take `&mut self`, so a run has exclusive access to the session handle
/// without any locking. Callers wanting concurrency hold one engine per
/// provider handle.
pub struct SignalEngine<P: MarketDataProvider> {
    provider: P,
    config: PipelineConfig,
}

impl<P: MarketDataProvider> SignalEngine<P> {
    /// Create an engine from an injected provider and configuration
    pub fn new(provider: P, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    /// Access the active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one pass ending now
    pub async fn run(&mut self) -> PipelineResult<Snapshot> {
        self.run_at(Utc::now()).await
    }

    /// Run one pass with an explicit end instant
    ///
    /// The request window covers `lookback_days` days up to `now`. Split out
    /// from [`run`](Self::run) so runs are reproducible against recorded
    /// data.
    pub async fn run_at(&mut self, now: DateTime<Utc>) -> PipelineResult<Snapshot> {
        let request = BarRequest::lookback(
            self.config.instrument.clone(),
            self.config.exchange.clone(),
            self.config.interval,
            self.config.lookback_days,
            now,
        );
        info!(
            "fetching {} days of {} bars for {} on {}",
            self.config.lookback_days, request.interval, request.instrument, request.exchange
        );

        let raw = self.provider.fetch_bars(&request).await?;
        debug!("provider returned {} raw rows", raw.len());

        let bars = normalize(raw, self.config.session.offset())?;
        let fetched = bars.len();

        let session_bars = filter_session(&self.config.session, bars);
        if session_bars.is_empty() {
            // Bars arrived but none inside the window: closed, not broken
            return Err(PipelineError::MarketClosed);
        }
        debug!(
            "{} of {} bars inside the trading session",
            session_bars.len(),
            fetched
        );

        let resampled = resample(&session_bars, self.config.resample.minutes());
        debug!(
            "resampled to {} {} buckets",
            resampled.len(),
            self.config.resample
        );

        let closes: Vec<f64> = resampled.iter().map(|b| b.close).collect();
        let series = macd(&closes, &self.config.macd)?;

        let strategy = self.config.strategy.build();
        let report = strategy.evaluate(&series);
        debug!(
            "strategy {} read {} events, trend {}",
            strategy.name(),
            report.events.len(),
            report.trend
        );

        let oscillator: Vec<OscillatorPoint> = (0..series.len())
            .map(|i| OscillatorPoint {
                position: i,
                macd: series.macd[i],
                signal: series.signal[i],
                histogram: series.histogram[i],
            })
            .collect();

        let last_bar = resampled.last().copied().ok_or(PipelineError::NoData)?;
        let (macd_last, signal_last) = match (series.macd.last(), series.signal.last()) {
            (Some(m), Some(s)) => (*m, *s),
            _ => return Err(PipelineError::NoData),
        };

        let latest = LatestReading {
            position: last_bar.position,
            timestamp: last_bar.timestamp,
            price: last_bar.close,
            macd: macd_last,
            signal: signal_last,
            trend: report.trend,
            buy: report.fresh_buy,
            sell: report.fresh_sell,
        };

        info!(
            "snapshot ready: {} bars, {} at {:.2}, trend {}",
            resampled.len(),
            latest.timestamp,
            latest.price,
            latest.trend
        );

        Ok(Snapshot {
            bars: resampled,
            oscillator,
            latest,
            events: report.events,
        })
    }
}
