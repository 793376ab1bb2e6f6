//! Core data types for the signal pipeline
//!
//! This module defines the bar, oscillator and signal types that flow between
//! pipeline stages. All types are serde-serializable so the snapshot can be
//! rendered directly by a presentation layer.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A clean, timezone-aware OHLCV bar
///
/// Produced by normalization: timestamps are strictly increasing, prices are
/// finite, and the timezone is the exchange's fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp in the exchange's timezone
    pub timestamp: DateTime<FixedOffset>,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume (0.0 when the feed reports none)
    pub volume: f64,
}

/// An aggregated bar carrying its dense position index
///
/// `position` runs 0,1,2,... in output order with no holes, so consecutive
/// bars are adjacent even across session breaks and overnight gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResampledBar {
    /// Dense position index
    pub position: usize,
    /// Bucket start timestamp (wall-clock aligned)
    pub timestamp: DateTime<FixedOffset>,
    /// First open in the bucket
    pub open: f64,
    /// Maximum high in the bucket
    pub high: f64,
    /// Minimum low in the bucket
    pub low: f64,
    /// Last close in the bucket
    pub close: f64,
    /// Summed volume over the bucket
    pub volume: f64,
}

/// One oscillator sample, aligned 1:1 with a resampled bar by position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    /// Position of the bar this sample belongs to
    pub position: usize,
    /// MACD line value
    pub macd: f64,
    /// Signal line value
    pub signal: f64,
    /// MACD minus signal
    pub histogram: f64,
}

/// Signal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    /// Upward crossover
    Buy,
    /// Downward crossover
    Sell,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A discrete crossover event at a bar position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvent {
    /// Position where the crossover fired
    pub position: usize,
    /// Direction of the crossover
    pub kind: SignalKind,
}

/// Market trend at the latest bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    /// Oscillator reads bullish
    Bullish,
    /// Oscillator reads bearish
    Bearish,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "BULLISH"),
            Trend::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// Reading at the most recent bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestReading {
    /// Position of the latest bar
    pub position: usize,
    /// Timestamp of the latest bar
    pub timestamp: DateTime<FixedOffset>,
    /// Latest close price
    pub price: f64,
    /// Latest MACD value
    pub macd: f64,
    /// Latest signal line value
    pub signal: f64,
    /// Trend reported by the active strategy
    pub trend: Trend,
    /// A buy crossover fired at this bar
    pub buy: bool,
    /// A sell crossover fired at this bar
    pub sell: bool,
}

/// Complete output of one pipeline run
///
/// Recomputed from scratch on every run and immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Resampled bars in position order
    pub bars: Vec<ResampledBar>,
    /// Oscillator series aligned 1:1 with `bars`
    pub oscillator: Vec<OscillatorPoint>,
    /// Reading at the most recent bar
    pub latest: LatestReading,
    /// Accumulated crossover events (empty under point-in-time strategies)
    pub events: Vec<SignalEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_kind_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&SignalKind::Buy).unwrap(), "\"BUY\"");
        assert_eq!(
            serde_json::to_string(&SignalKind::Sell).unwrap(),
            "\"SELL\""
        );
        assert_eq!(SignalKind::Buy.to_string(), "BUY");
    }

    #[test]
    fn test_trend_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Trend::Bullish).unwrap(),
            "\"BULLISH\""
        );
        assert_eq!(Trend::Bearish.to_string(), "BEARISH");
    }

    #[test]
    fn test_bar_serde_round_trip() {
        let bar = Bar {
            timestamp: "2024-01-02T09:15:00+05:30".parse().unwrap(),
            open: 21730.0,
            high: 21745.0,
            low: 21725.5,
            close: 21742.5,
            volume: 0.0,
        };
        let json = serde_json::to_string(&bar).unwrap();
        let back: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bar);
    }
}
