//! Wave labeling — pairs consecutive pivots into numbered Elliott-style waves.

use serde::{Deserialize, Serialize};

use super::pivot::Pivot;

/// Waves labeled per window.
pub const MAX_WAVES: usize = 5;
/// Pivots required before any wave is labeled.
pub const MIN_PIVOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveKind {
    Impulse,
    Corrective,
}

impl WaveKind {
    /// Odd waves (1, 3, 5) are impulses, even waves (2, 4) are corrections.
    pub fn for_number(number: u8) -> Self {
        if number % 2 == 1 {
            Self::Impulse
        } else {
            Self::Corrective
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// 1-based wave number.
    pub number: u8,
    pub start: f64,
    pub end: f64,
    pub kind: WaveKind,
    pub direction: WaveDirection,
}

impl Wave {
    pub fn new(number: u8, start: f64, end: f64) -> Self {
        Self {
            number,
            start,
            end,
            kind: WaveKind::for_number(number),
            direction: if end > start {
                WaveDirection::Up
            } else {
                WaveDirection::Down
            },
        }
    }

    pub fn range(&self) -> f64 {
        (self.end - self.start).abs()
    }
}

/// Label waves `1..=min(5, pivots - 1)` from consecutive pivot pairs.
///
/// Fewer than [`MIN_PIVOTS`] pivots yields no waves. A wave without a
/// following pivot starts and ends on the same pivot.
pub fn build_waves(pivots: &[Pivot]) -> Vec<Wave> {
    if pivots.len() < MIN_PIVOTS {
        return Vec::new();
    }

    (0..MAX_WAVES.min(pivots.len() - 1))
        .map(|i| {
            let start = &pivots[i];
            let end = pivots.get(i + 1).unwrap_or(start);
            Wave::new(i as u8 + 1, start.price, end.price)
        })
        .collect()
}

/// Wave the market is currently in: one past the last labeled wave, capped
/// at 5. A window with no waves is in wave 1.
pub fn current_wave(waves: &[Wave]) -> u8 {
    if waves.is_empty() {
        return 1;
    }
    (waves.len() + 1).min(MAX_WAVES) as u8
}
