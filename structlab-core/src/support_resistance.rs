//! Horizontal support/resistance from strict short-radius swings.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::swing::{is_strict_swing_high, is_strict_swing_low};

/// Candles on each side a swing must strictly dominate.
pub const SWING_RADIUS: usize = 2;
/// Levels reported per side.
pub const MAX_LEVELS: usize = 5;
/// Windows shorter than this report no levels.
pub const MIN_CANDLES: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    /// Highest first.
    pub support_levels: Vec<f64>,
    /// Lowest first.
    pub resistance_levels: Vec<f64>,
}

/// Strict radius-2 swing lows become support, swing highs resistance.
/// Duplicate prices collapse into one level.
pub fn detect_support_resistance(candles: &[Candle]) -> SupportResistance {
    if candles.len() < MIN_CANDLES {
        return SupportResistance::default();
    }

    let mut support: Vec<f64> = (0..candles.len())
        .filter(|&i| is_strict_swing_low(candles, i, SWING_RADIUS))
        .map(|i| candles[i].low)
        .collect();
    let mut resistance: Vec<f64> = (0..candles.len())
        .filter(|&i| is_strict_swing_high(candles, i, SWING_RADIUS))
        .map(|i| candles[i].high)
        .collect();

    support.sort_by(|a, b| b.total_cmp(a));
    support.dedup();
    support.truncate(MAX_LEVELS);

    resistance.sort_by(|a, b| a.total_cmp(b));
    resistance.dedup();
    resistance.truncate(MAX_LEVELS);

    SupportResistance {
        support_levels: support,
        resistance_levels: resistance,
    }
}
