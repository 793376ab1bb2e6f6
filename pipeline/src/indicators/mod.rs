//! Oscillator computation

pub mod macd;

pub use macd::{macd, MacdParams, MacdSeries};
