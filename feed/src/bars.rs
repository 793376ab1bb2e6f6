//! Bar types and identifiers for market data requests
//!
//! This module defines the wire-level bar types returned by providers and the
//! identifiers used to address instruments. All types are provider-agnostic;
//! provider adapters convert their native payloads into these shapes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Instrument identifier (index or ticker symbol, e.g. "^NSEI")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    /// Create a new InstrumentId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the instrument symbol string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exchange identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeId(pub String);

impl ExchangeId {
    /// Create a new ExchangeId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the exchange identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provider identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

impl ProviderId {
    /// Create a new ProviderId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the provider identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bar interval supported by providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarInterval {
    /// 1 minute
    #[serde(rename = "1m")]
    Min1,
    /// 2 minutes
    #[serde(rename = "2m")]
    Min2,
    /// 5 minutes
    #[serde(rename = "5m")]
    Min5,
    /// 15 minutes
    #[serde(rename = "15m")]
    Min15,
    /// 30 minutes
    #[serde(rename = "30m")]
    Min30,
    /// 1 hour
    #[serde(rename = "1h")]
    Hour1,
    /// 1 day
    #[serde(rename = "1d")]
    Day1,
}

impl BarInterval {
    /// Interval width in minutes
    pub fn minutes(&self) -> u32 {
        match self {
            BarInterval::Min1 => 1,
            BarInterval::Min2 => 2,
            BarInterval::Min5 => 5,
            BarInterval::Min15 => 15,
            BarInterval::Min30 => 30,
            BarInterval::Hour1 => 60,
            BarInterval::Day1 => 1440,
        }
    }

    /// Interval width as a chrono duration
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes()))
    }

    /// Short label, also the query code providers accept (e.g. "5m")
    pub fn label(&self) -> &'static str {
        match self {
            BarInterval::Min1 => "1m",
            BarInterval::Min2 => "2m",
            BarInterval::Min5 => "5m",
            BarInterval::Min15 => "15m",
            BarInterval::Min30 => "30m",
            BarInterval::Hour1 => "1h",
            BarInterval::Day1 => "1d",
        }
    }

    /// All supported intervals, narrowest first
    pub fn all() -> [BarInterval; 7] {
        [
            BarInterval::Min1,
            BarInterval::Min2,
            BarInterval::Min5,
            BarInterval::Min15,
            BarInterval::Min30,
            BarInterval::Hour1,
            BarInterval::Day1,
        ]
    }
}

impl std::fmt::Display for BarInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Timestamp as delivered by a provider, before normalization
///
/// Feeds disagree on the wire form: some send epoch seconds, others a
/// formatted datetime string. Both are carried verbatim; downstream
/// normalization decides how to interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Seconds since the Unix epoch
    Epoch(i64),
    /// Formatted datetime string
    Text(String),
}

/// A single raw OHLCV row as returned by a provider
///
/// Fields are optional because providers pad incomplete rows with nulls.
/// Rows are not validated here; corrupt rows are recovered downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Bar timestamp (epoch seconds or text, provider-dependent)
    pub timestamp: RawTimestamp,
    /// Opening price
    pub open: Option<f64>,
    /// Highest price
    pub high: Option<f64>,
    /// Lowest price
    pub low: Option<f64>,
    /// Closing price
    pub close: Option<f64>,
    /// Traded volume (index feeds usually report none)
    pub volume: Option<f64>,
}

/// Request for a range of intraday bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRequest {
    /// Instrument to fetch
    pub instrument: InstrumentId,
    /// Exchange the instrument trades on
    pub exchange: ExchangeId,
    /// Requested bar interval
    pub interval: BarInterval,
    /// Start of the requested range (inclusive)
    pub from: DateTime<Utc>,
    /// End of the requested range (inclusive)
    pub to: DateTime<Utc>,
}

impl BarRequest {
    /// Create a new bar request
    pub fn new(
        instrument: InstrumentId,
        exchange: ExchangeId,
        interval: BarInterval,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            instrument,
            exchange,
            interval,
            from,
            to,
        }
    }

    /// Request covering the trailing `days` days up to `now`
    pub fn lookback(
        instrument: InstrumentId,
        exchange: ExchangeId,
        interval: BarInterval,
        days: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            instrument,
            exchange,
            interval,
            now - Duration::days(i64::from(days)),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_minutes_and_label() {
        assert_eq!(BarInterval::Min5.minutes(), 5);
        assert_eq!(BarInterval::Min5.label(), "5m");
        assert_eq!(BarInterval::Hour1.minutes(), 60);
        assert_eq!(BarInterval::Day1.label(), "1d");
        assert_eq!(BarInterval::Min15.duration(), Duration::minutes(15));
    }

    #[test]
    fn test_interval_all_is_sorted() {
        let all = BarInterval::all();
        for pair in all.windows(2) {
            assert!(pair[0].minutes() < pair[1].minutes());
        }
    }

    #[test]
    fn test_interval_serde_uses_label() {
        let json = serde_json::to_string(&BarInterval::Min15).unwrap();
        assert_eq!(json, "\"15m\"");
        let parsed: BarInterval = serde_json::from_str("\"5m\"").unwrap();
        assert_eq!(parsed, BarInterval::Min5);
    }

    #[test]
    fn test_raw_timestamp_untagged_serde() {
        let epoch: RawTimestamp = serde_json::from_str("1704186900").unwrap();
        assert_eq!(epoch, RawTimestamp::Epoch(1704186900));

        let text: RawTimestamp = serde_json::from_str("\"2024-01-02 09:15\"").unwrap();
        assert_eq!(text, RawTimestamp::Text("2024-01-02 09:15".to_string()));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(InstrumentId::new("^NSEI").to_string(), "^NSEI");
        assert_eq!(ExchangeId::new("NSE").as_str(), "NSE");
        assert_eq!(ProviderId::new("yahoo").to_string(), "yahoo");
    }

    #[test]
    fn test_lookback_request_window() {
        let now = Utc::now();
        let request = BarRequest::lookback(
            InstrumentId::new("^NSEI"),
            ExchangeId::new("NSE"),
            BarInterval::Min5,
            5,
            now,
        );
        assert_eq!(request.to, now);
        assert_eq!(request.to - request.from, Duration::days(5));
    }
}
