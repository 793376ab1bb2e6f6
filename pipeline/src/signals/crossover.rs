//! Crossover detection strategies
//!
//! Two deliberately different readings of the same oscillator sit behind one
//! interface. The zero-line strategy accumulates every crossing of the MACD
//! line through zero into an event list; the signal-line strategy answers
//! only the point-in-time question of where the MACD line sits relative to
//! its signal line right now. Which one runs is a configuration choice, not
//! an accident.

use serde::{Deserialize, Serialize};

use crate::indicators::macd::MacdSeries;
use crate::types::{SignalEvent, SignalKind, Trend};

/// Everything a strategy reads out of one oscillator series
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverReport {
    /// Accumulated crossover events in position order (empty under
    /// point-in-time strategies)
    pub events: Vec<SignalEvent>,
    /// Trend at the latest position
    pub trend: Trend,
    /// A buy crossover fired at the latest position
    pub fresh_buy: bool,
    /// A sell crossover fired at the latest position
    pub fresh_sell: bool,
}

/// A crossover reading of a MACD series
pub trait CrossoverStrategy: Send + Sync {
    /// Strategy name, as written in configuration
    fn name(&self) -> &'static str;

    /// Evaluate the series
    ///
    /// An empty series reads as bearish with no events.
    fn evaluate(&self, series: &MacdSeries) -> CrossoverReport;
}

/// Zero-line crossover strategy
///
/// Scans positions 1.. and records a BUY wherever the MACD line moves from
/// at-or-below zero to above, a SELL wherever it moves from at-or-above zero
/// to below. At most one event per position, nothing at position 0. Trend is
/// the sign of the latest MACD value.
pub struct ZeroLineStrategy;

impl CrossoverStrategy for ZeroLineStrategy {
    fn name(&self) -> &'static str {
        "zero-line"
    }

    fn evaluate(&self, series: &MacdSeries) -> CrossoverReport {
        let macd = &series.macd;
        let mut events = Vec::new();

        for i in 1..macd.len() {
            if macd[i] > 0.0 && macd[i - 1] <= 0.0 {
                events.push(SignalEvent {
                    position: i,
                    kind: SignalKind::Buy,
                });
            } else if macd[i] < 0.0 && macd[i - 1] >= 0.0 {
                events.push(SignalEvent {
                    position: i,
                    kind: SignalKind::Sell,
                });
            }
        }

        let last = macd.len().checked_sub(1);
        let trend = match last {
            Some(i) if macd[i] > 0.0 => Trend::Bullish,
            _ => Trend::Bearish,
        };

        let (fresh_buy, fresh_sell) = match (events.last(), last) {
            (Some(event), Some(i)) if event.position == i => (
                event.kind == SignalKind::Buy,
                event.kind == SignalKind::Sell,
            ),
            _ => (false, false),
        };

        CrossoverReport {
            events,
            trend,
            fresh_buy,
            fresh_sell,
        }
    }
}

/// Signal-line crossover strategy
///
/// Keeps no event history. Trend is a pure level comparison of the MACD line
/// against the signal line at the latest position; the fresh flags report
/// whether the two lines crossed between the last two positions.
pub struct SignalLineStrategy;

impl CrossoverStrategy for SignalLineStrategy {
    fn name(&self) -> &'static str {
        "signal-line"
    }

    fn evaluate(&self, series: &MacdSeries) -> CrossoverReport {
        let n = series.macd.len();

        let trend = if n > 0 && series.macd[n - 1] > series.signal[n - 1] {
            Trend::Bullish
        } else {
            Trend::Bearish
        };

        let (fresh_buy, fresh_sell) = if n >= 2 {
            let above_now = series.macd[n - 1] > series.signal[n - 1];
            let below_now = series.macd[n - 1] < series.signal[n - 1];
            let above_prev = series.macd[n - 2] > series.signal[n - 2];
            let below_prev = series.macd[n - 2] < series.signal[n - 2];
            (above_now && !above_prev, below_now && !below_prev)
        } else {
            (false, false)
        };

        CrossoverReport {
            events: Vec::new(),
            trend,
            fresh_buy,
            fresh_sell,
        }
    }
}

/// Which crossover strategy the pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Accumulate zero-line crossings into an event list
    ZeroLine,
    /// Point-in-time MACD versus signal-line comparison
    SignalLine,
}

impl StrategyKind {
    /// Build the configured strategy
    pub fn build(&self) -> Box<dyn CrossoverStrategy> {
        match self {
            StrategyKind::ZeroLine => Box::new(ZeroLineStrategy),
            StrategyKind::SignalLine => Box::new(SignalLineStrategy),
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::ZeroLine
    }
}
