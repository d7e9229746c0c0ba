//! Liquidity sweeps: a candle trading through the extremes of the candles
//! just before it, taking the resting stops beyond them.

use serde::{Deserialize, Serialize};

use super::detector::FeatureDetector;
use crate::bounded::{RecentBuffer, MAX_LIQUIDITY_ZONES};
use crate::config::SmcConfig;
use crate::domain::{Bias, Candle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    #[default]
    Swept,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityZone {
    pub start: f64,
    pub end: f64,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    pub direction: Bias,
    /// Index of the sweeping candle.
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct LiquidityZoneDetector {
    lookback: usize,
    min_candles: usize,
}

impl LiquidityZoneDetector {
    pub fn new(lookback: usize, min_candles: usize) -> Self {
        assert!(lookback >= 1, "liquidity lookback must be >= 1");
        Self {
            lookback,
            min_candles,
        }
    }

    pub fn from_config(config: &SmcConfig) -> Self {
        Self::new(config.liquidity_lookback, config.min_candles)
    }
}

impl Default for LiquidityZoneDetector {
    fn default() -> Self {
        Self::from_config(&SmcConfig::default())
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

impl FeatureDetector for LiquidityZoneDetector {
    type Feature = LiquidityZone;

    fn name(&self) -> &str {
        "liquidity_zones"
    }

    fn min_candles(&self) -> usize {
        self.min_candles.max(self.lookback + 1)
    }

    fn detect(&self, candles: &[Candle]) -> Vec<LiquidityZone> {
        if candles.len() < self.min_candles() {
            return Vec::new();
        }

        let mut zones = RecentBuffer::new(MAX_LIQUIDITY_ZONES);
        for i in self.lookback..candles.len() {
            let prior = &candles[i - self.lookback..i];
            let current = &candles[i];

            let (high_min, high_max) = bounds(prior.iter().map(|c| c.high));
            if current.high > high_max {
                zones.push(LiquidityZone {
                    start: high_min,
                    end: high_max,
                    kind: ZoneKind::Swept,
                    direction: Bias::Bullish,
                    index: i,
                });
            }

            let (low_min, low_max) = bounds(prior.iter().map(|c| c.low));
            if current.low < low_min {
                zones.push(LiquidityZone {
                    start: low_min,
                    end: low_max,
                    kind: ZoneKind::Swept,
                    direction: Bias::Bearish,
                    index: i,
                });
            }
        }
        zones.into_vec()
    }
}
