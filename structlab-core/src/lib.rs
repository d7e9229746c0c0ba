//! StructLab Core — market-structure analysis over OHLCV candle windows.
//!
//! This crate contains the analysis engine:
//! - Domain types (candles, bias, signal strength)
//! - Pivot detection, Elliott-style wave labeling, Fibonacci and trend
//! - Volume profile with point of control and value area
//! - Smart-money scanners (order blocks, fair value gaps, structure breaks,
//!   liquidity sweeps) behind one detector trait, plus their aggregated verdict
//! - Candle ingestion from CSV and exchange klines
//!
//! Every analysis is a pure function of the window it is given.

pub mod analyzer;
pub mod bounded;
pub mod config;
pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod math;
pub mod smc;
pub mod support_resistance;
pub mod swing;
pub mod volume;
pub mod waves;

pub use analyzer::{MarketAnalyzer, MarketReport};
pub use config::{AnalysisConfig, ConfigError};
pub use domain::{Bias, Candle, SignalStrength};
