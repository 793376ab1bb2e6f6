//! MACD oscillator
//!
//! MACD line = EMA(fast) - EMA(slow) over closes; signal line = EMA(signal)
//! over the MACD line; histogram = MACD - signal. EMAs use the recursive form
//! seeded with the first sample, so every output index is defined and all
//! three series are exactly as long as the input.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Exponential moving average, seeded with the first sample
///
/// EMA[0] = x[0]; EMA[i] = alpha * x[i] + (1 - alpha) * EMA[i-1] with
/// alpha = 2 / (span + 1).
struct Ema {
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    fn new(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: None,
        }
    }

    fn update(&mut self, x: f64) -> f64 {
        let next = match self.value {
            None => x,
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }
}

/// MACD span parameters and the data-volume floor
///
/// Defaults are the conventional 12/26/9 spans with a 20-bar floor. Changing
/// spans changes the meaning of every downstream signal, so overrides belong
/// in deliberate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// Fast EMA span
    pub fast: usize,
    /// Slow EMA span
    pub slow: usize,
    /// Signal EMA span
    pub signal: usize,
    /// Minimum bars required before computing at all
    pub min_bars: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            min_bars: 20,
        }
    }
}

/// Full-length MACD output, aligned index-for-index with the input closes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    /// MACD line
    pub macd: Vec<f64>,
    /// Signal line
    pub signal: Vec<f64>,
    /// MACD minus signal
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// True when the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Compute the MACD oscillator over a close series
///
/// # Errors
/// Returns [`PipelineError::InsufficientData`] when fewer than
/// `params.min_bars` closes are supplied. Early values are mathematically
/// defined but statistically weak; the floor keeps them from masquerading as
/// signals.
pub fn macd(closes: &[f64], params: &MacdParams) -> PipelineResult<MacdSeries> {
    if closes.len() < params.min_bars {
        return Err(PipelineError::InsufficientData {
            have: closes.len(),
            need: params.min_bars,
        });
    }

    let mut fast = Ema::new(params.fast);
    let mut slow = Ema::new(params.slow);
    let mut macd_line = Vec::with_capacity(closes.len());
    for close in closes {
        macd_line.push(fast.update(*close) - slow.update(*close));
    }

    let mut signal_ema = Ema::new(params.signal);
    let signal_line: Vec<f64> = macd_line.iter().map(|m| signal_ema.update(*m)).collect();

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}
