//! Crossover signal strategies

pub mod crossover;

pub use crossover::{
    CrossoverReport, CrossoverStrategy, SignalLineStrategy, StrategyKind, ZeroLineStrategy,
};
