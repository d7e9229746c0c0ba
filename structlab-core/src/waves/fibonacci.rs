//! Fibonacci projections from wave 1.

use serde::{Deserialize, Serialize};

use super::wave::{Wave, WaveDirection};
use crate::math::round2;

/// Ratios projected from wave 1, in ascending order.
pub const FIBONACCI_RATIOS: [f64; 8] = [0.236, 0.382, 0.5, 0.618, 0.786, 1.0, 1.618, 2.618];

const RATIO_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Projected price per Fibonacci ratio. Empty means "no projection".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FibonacciLevels {
    levels: Vec<FibonacciLevel>,
}

impl FibonacciLevels {
    /// Price projected for `ratio`, if present.
    pub fn get(&self, ratio: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|l| (l.ratio - ratio).abs() < RATIO_EPSILON)
            .map(|l| l.price)
    }

    pub fn levels(&self) -> &[FibonacciLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Project every ratio in [`FIBONACCI_RATIOS`] beyond wave 1's end, extending
/// in wave 1's own direction. Prices are rounded to 2 decimals.
///
/// Requires waves 1 and 2; otherwise returns empty levels.
pub fn project_fibonacci(waves: &[Wave]) -> FibonacciLevels {
    let (Some(wave1), Some(_)) = (
        waves.iter().find(|w| w.number == 1),
        waves.iter().find(|w| w.number == 2),
    ) else {
        return FibonacciLevels::default();
    };

    let range = wave1.range();
    let sign = match wave1.direction {
        WaveDirection::Up => 1.0,
        WaveDirection::Down => -1.0,
    };

    let levels = FIBONACCI_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            ratio,
            price: round2(wave1.end + sign * range * ratio),
        })
        .collect();

    FibonacciLevels { levels }
}
