//! Pivot detection — local extrema confirmed by a symmetric neighbourhood.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::swing::{is_swing_high, is_swing_low};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotKind {
    High,
    Low,
}

/// A confirmed local extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    /// Index into the analyzed window.
    pub index: usize,
    pub price: f64,
    pub kind: PivotKind,
}

/// Finds pivots whose high (low) is `>=` (`<=`) every high (low) within
/// `radius` candles on each side.
///
/// An index that satisfies both tests is reported as a High pivot only.
#[derive(Debug, Clone)]
pub struct PivotDetector {
    radius: usize,
}

impl PivotDetector {
    pub const DEFAULT_RADIUS: usize = 5;

    pub fn new(radius: usize) -> Self {
        assert!(radius >= 1, "pivot radius must be >= 1");
        Self { radius }
    }

    /// Smallest window that can contain a pivot: `2 * radius + 1`.
    pub fn min_candles(&self) -> usize {
        2 * self.radius + 1
    }

    /// Pivots ordered by index. Empty if the window is shorter than
    /// [`min_candles`](Self::min_candles).
    pub fn detect(&self, candles: &[Candle]) -> Vec<Pivot> {
        if candles.len() < self.min_candles() {
            return Vec::new();
        }

        (self.radius..candles.len() - self.radius)
            .filter_map(|i| {
                if is_swing_high(candles, i, self.radius) {
                    Some(Pivot {
                        index: i,
                        price: candles[i].high,
                        kind: PivotKind::High,
                    })
                } else if is_swing_low(candles, i, self.radius) {
                    Some(Pivot {
                        index: i,
                        price: candles[i].low,
                        kind: PivotKind::Low,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for PivotDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS)
    }
}
