//! Trend bias from a least-squares line through recent closes.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::math::linear_slope;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Sideways,
}

/// Classifies the sign of the regression slope over the last `lookback` closes.
#[derive(Debug, Clone)]
pub struct TrendDetector {
    lookback: usize,
}

impl TrendDetector {
    pub const DEFAULT_LOOKBACK: usize = 20;

    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 2, "trend lookback must be >= 2");
        Self { lookback }
    }

    pub fn detect(&self, candles: &[Candle]) -> Trend {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        self.detect_closes(&closes)
    }

    /// Sideways when fewer than `lookback` closes are available or the slope
    /// is exactly zero.
    pub fn detect_closes(&self, closes: &[f64]) -> Trend {
        if closes.len() < self.lookback {
            return Trend::Sideways;
        }
        let recent = &closes[closes.len() - self.lookback..];
        let slope = linear_slope(recent);
        if slope > 0.0 {
            Trend::Bullish
        } else if slope < 0.0 {
            Trend::Bearish
        } else {
            Trend::Sideways
        }
    }
}

impl Default for TrendDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOOKBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_candles;

    #[test]
    fn rising_closes_are_bullish() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        assert_eq!(TrendDetector::default().detect(&make_candles(&closes)), Trend::Bullish);
    }

    #[test]
    fn falling_closes_are_bearish() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - 0.5 * i as f64).collect();
        assert_eq!(TrendDetector::default().detect_closes(&closes), Trend::Bearish);
    }

    #[test]
    fn flat_closes_are_sideways() {
        assert_eq!(TrendDetector::default().detect_closes(&[101.37; 30]), Trend::Sideways);
    }

    #[test]
    fn short_series_is_sideways() {
        let closes: Vec<f64> = (0..19).map(|i| i as f64).collect();
        assert_eq!(TrendDetector::default().detect_closes(&closes), Trend::Sideways);
    }

    #[test]
    fn only_the_last_lookback_closes_count() {
        // Long decline followed by a 20-close rally.
        let mut closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        closes.extend((0..20).map(|i| 160.0 + i as f64));
        assert_eq!(TrendDetector::default().detect_closes(&closes), Trend::Bullish);
    }
}
