//! Pipeline configuration
//!
//! One YAML-loadable struct covering the whole run: what to fetch, the
//! exchange session, the resample width, oscillator spans and the active
//! strategy. Defaults describe the reference deployment (NIFTY 50 on NSE,
//! 5-minute source bars over 5 days, 15-minute resample, 12/26/9 MACD,
//! zero-line strategy). Every field can be overridden piecemeal.

use serde::{Deserialize, Serialize};
use std::path::Path;

use sig_feed::{BarInterval, ExchangeId, InstrumentId};

use crate::error::{PipelineError, PipelineResult};
use crate::indicators::macd::MacdParams;
use crate::session::TradingSession;
use crate::signals::crossover::StrategyKind;

/// Configuration for one signal pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Instrument to watch
    pub instrument: InstrumentId,
    /// Exchange the instrument trades on
    pub exchange: ExchangeId,
    /// Source bar interval requested from the provider
    pub interval: BarInterval,
    /// Days of history fetched per run
    pub lookback_days: u32,
    /// Exchange trading session
    pub session: TradingSession,
    /// Target interval bars are resampled to
    pub resample: BarInterval,
    /// Oscillator parameters
    pub macd: MacdParams,
    /// Active crossover strategy
    pub strategy: StrategyKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            instrument: InstrumentId::new("^NSEI"),
            exchange: ExchangeId::new("NSE"),
            interval: BarInterval::Min5,
            lookback_days: 5,
            session: TradingSession::default(),
            resample: BarInterval::Min15,
            macd: MacdParams::default(),
            strategy: StrategyKind::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(text: &str) -> PipelineResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> PipelineResult<()> {
        if self.instrument.as_str().is_empty() {
            return Err(PipelineError::ConfigError("instrument must not be empty".to_string()));
        }
        if self.lookback_days == 0 {
            return Err(PipelineError::ConfigError("lookback_days must be at least 1".to_string()));
        }
        if self.resample.minutes() < self.interval.minutes() {
            return Err(PipelineError::ConfigError(format!(
                "resample width {} is narrower than the source interval {}",
                self.resample, self.interval
            )));
        }
        if self.macd.fast == 0 || self.macd.slow == 0 || self.macd.signal == 0 {
            return Err(PipelineError::ConfigError("MACD spans must be positive".to_string()));
        }
        if self.macd.fast >= self.macd.slow {
            return Err(PipelineError::ConfigError(format!(
                "fast span {} must be below slow span {}",
                self.macd.fast, self.macd.slow
            )));
        }
        if self.macd.min_bars < 2 {
            return Err(PipelineError::ConfigError(
                "min_bars must be at least 2 for crossover detection".to_string(),
            ));
        }
        if self.session.utc_offset_secs.abs() >= 86_400 {
            return Err(PipelineError::ConfigError(format!(
                "utc_offset_secs {} is outside the valid range",
                self.session.utc_offset_secs
            )));
        }
        if self.session.open > self.session.close {
            return Err(PipelineError::ConfigError(
                "session open must not be after session close".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_default_is_reference_deployment() {
        let config = PipelineConfig::default();
        assert_eq!(config.instrument.as_str(), "^NSEI");
        assert_eq!(config.exchange.as_str(), "NSE");
        assert_eq!(config.interval, BarInterval::Min5);
        assert_eq!(config.lookback_days, 5);
        assert_eq!(config.resample, BarInterval::Min15);
        assert_eq!(config.strategy, StrategyKind::ZeroLine);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_from_defaults() {
        let config = PipelineConfig::from_yaml(
            r#"
instrument: "^BSESN"
resample: "30m"
strategy:
  type: signal-line
"#,
        )
        .unwrap();

        assert_eq!(config.instrument.as_str(), "^BSESN");
        assert_eq!(config.resample, BarInterval::Min30);
        assert_eq!(config.strategy, StrategyKind::SignalLine);
        // Untouched fields come from the reference deployment
        assert_eq!(config.interval, BarInterval::Min5);
        assert_eq!(config.lookback_days, 5);
    }

    #[test]
    fn test_session_yaml_overrides() {
        let config = PipelineConfig::from_yaml(
            r#"
session:
  utc_offset_secs: 0
  open: "08:00:00"
  close: "16:30:00"
  weekend_closed: false
"#,
        )
        .unwrap();
        assert_eq!(config.session.utc_offset_secs, 0);
        assert!(!config.session.weekend_closed);
    }

    #[test]
    fn test_partial_session_block_fills_from_defaults() {
        // Naming only one session field must not discard the others
        let config = PipelineConfig::from_yaml(
            r#"
session:
  open: "09:00:00"
"#,
        )
        .unwrap();
        assert_eq!(config.session.open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(config.session.close, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
        assert_eq!(config.session.utc_offset_secs, 19800);
        assert!(config.session.weekend_closed);
    }

    #[test]
    fn test_validate_rejects_narrow_resample() {
        let mut config = PipelineConfig::default();
        config.interval = BarInterval::Min15;
        config.resample = BarInterval::Min5;
        assert!(matches!(
            config.validate(),
            Err(PipelineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_spans() {
        let mut config = PipelineConfig::default();
        config.macd.fast = 26;
        config.macd.slow = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_floor() {
        let mut config = PipelineConfig::default();
        config.macd.min_bars = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_offset() {
        let mut config = PipelineConfig::default();
        config.session.utc_offset_secs = 90_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_instrument() {
        let mut config = PipelineConfig::default();
        config.instrument = InstrumentId::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_yaml_runs_validation() {
        let result = PipelineConfig::from_yaml("lookback_days: 0\n");
        assert!(matches!(result, Err(PipelineError::ConfigError(_))));
    }
}
