//! Elliott-style wave analysis.
//!
//! Pipeline over one candle window:
//! 1. [`PivotDetector`] finds symmetric swing extremes
//! 2. [`build_waves`] pairs consecutive pivots into up to five waves
//! 3. [`project_fibonacci`] extends wave 1 by the Fibonacci ratios
//! 4. [`project_forecast`] picks targets for the wave in progress
//!
//! [`TrendDetector`] runs alongside and reports the regression bias.

pub mod fibonacci;
pub mod forecast;
pub mod pivot;
pub mod trend;
pub mod wave;

pub use fibonacci::{project_fibonacci, FibonacciLevel, FibonacciLevels, FIBONACCI_RATIOS};
pub use forecast::{project_forecast, Forecast};
pub use pivot::{Pivot, PivotDetector, PivotKind};
pub use trend::{Trend, TrendDetector};
pub use wave::{build_waves, current_wave, Wave, WaveDirection, WaveKind, MAX_WAVES, MIN_PIVOTS};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::Candle;

/// Pivots, labeled waves and trend for one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveStructure {
    pub waves: Vec<Wave>,
    pub pivots: Vec<Pivot>,
    pub trend: Trend,
}

impl WaveStructure {
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty() && self.pivots.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveAnalysis {
    pub wave_structure: WaveStructure,
    pub fibonacci_levels: FibonacciLevels,
    pub current_wave: u8,
    pub forecast: Option<Forecast>,
}

/// Run the full wave pipeline. Windows shorter than `waves.min_candles`
/// produce an empty structure, no levels, wave 1 and no forecast.
pub fn analyze_waves(candles: &[Candle], config: &AnalysisConfig) -> WaveAnalysis {
    let wave_structure = if candles.len() < config.waves.min_candles {
        WaveStructure::default()
    } else {
        let pivots = PivotDetector::new(config.pivots.radius).detect(candles);
        WaveStructure {
            waves: build_waves(&pivots),
            pivots,
            trend: TrendDetector::new(config.waves.trend_lookback).detect(candles),
        }
    };

    let fibonacci_levels = project_fibonacci(&wave_structure.waves);
    let current_wave = current_wave(&wave_structure.waves);
    let forecast = project_forecast(current_wave, &fibonacci_levels);

    debug!(
        candles = candles.len(),
        pivots = wave_structure.pivots.len(),
        waves = wave_structure.waves.len(),
        trend = ?wave_structure.trend,
        current_wave,
        "wave analysis complete"
    );

    WaveAnalysis {
        wave_structure,
        fibonacci_levels,
        current_wave,
        forecast,
    }
}
