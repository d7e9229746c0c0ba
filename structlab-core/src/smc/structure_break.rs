//! Structure breaks: successive swing highs making higher highs, or
//! successive swing lows making lower lows.

use serde::{Deserialize, Serialize};

use super::detector::FeatureDetector;
use crate::bounded::{tail, MAX_STRUCTURE_BREAKS};
use crate::config::SmcConfig;
use crate::domain::{Bias, Candle};
use crate::swing::{is_swing_high, is_swing_low};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    HigherHigh,
    LowerLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureBreak {
    /// Price of the earlier swing that was exceeded.
    pub level: f64,
    pub direction: Bias,
    pub confirmed: bool,
    #[serde(rename = "type")]
    pub kind: BreakKind,
    /// Index of the later swing that confirmed the break.
    pub index: usize,
}

#[derive(Debug, Clone, Copy)]
struct Swing {
    index: usize,
    price: f64,
}

#[derive(Debug, Clone)]
pub struct StructureBreakDetector {
    radius: usize,
    min_candles: usize,
}

impl StructureBreakDetector {
    pub fn new(radius: usize, min_candles: usize) -> Self {
        assert!(radius >= 1, "swing radius must be >= 1");
        Self {
            radius,
            min_candles,
        }
    }

    pub fn from_config(config: &SmcConfig) -> Self {
        Self::new(config.swing_radius, config.structure_min_candles)
    }

    fn swings(&self, candles: &[Candle]) -> (Vec<Swing>, Vec<Swing>) {
        let mut highs = Vec::new();
        let mut lows = Vec::new();
        for i in 0..candles.len() {
            if is_swing_high(candles, i, self.radius) {
                highs.push(Swing {
                    index: i,
                    price: candles[i].high,
                });
            }
            if is_swing_low(candles, i, self.radius) {
                lows.push(Swing {
                    index: i,
                    price: candles[i].low,
                });
            }
        }
        (highs, lows)
    }
}

impl Default for StructureBreakDetector {
    fn default() -> Self {
        Self::from_config(&SmcConfig::default())
    }
}

fn breaks_between<'a>(
    swings: &'a [Swing],
    direction: Bias,
    kind: BreakKind,
    exceeds: impl Fn(f64, f64) -> bool + 'a,
) -> impl Iterator<Item = StructureBreak> + 'a {
    swings.windows(2).filter_map(move |pair| {
        let (earlier, later) = (pair[0], pair[1]);
        exceeds(later.price, earlier.price).then_some(StructureBreak {
            level: earlier.price,
            direction,
            confirmed: true,
            kind,
            index: later.index,
        })
    })
}

impl FeatureDetector for StructureBreakDetector {
    type Feature = StructureBreak;

    fn name(&self) -> &str {
        "structure_breaks"
    }

    fn min_candles(&self) -> usize {
        self.min_candles.max(2 * self.radius + 1)
    }

    fn detect(&self, candles: &[Candle]) -> Vec<StructureBreak> {
        if candles.len() < self.min_candles() {
            return Vec::new();
        }

        let (highs, lows) = self.swings(candles);
        let mut breaks: Vec<StructureBreak> =
            breaks_between(&highs, Bias::Bullish, BreakKind::HigherHigh, |a, b| a > b)
                .chain(breaks_between(&lows, Bias::Bearish, BreakKind::LowerLow, |a, b| a < b))
                .collect();

        // Stable: bullish breaks stay ahead of bearish ones on the same index.
        breaks.sort_by_key(|b| b.index);
        tail(&breaks, MAX_STRUCTURE_BREAKS).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rising highs and falling lows in the background so that only the
    /// planted spikes and dips are swings.
    fn window(len: usize, spikes: &[(usize, f64)], dips: &[(usize, f64)]) -> Vec<Candle> {
        (0..len)
            .map(|i| {
                let mut high = 100.0 + 0.01 * i as f64;
                let mut low = 90.0 - 0.01 * i as f64;
                if let Some(&(_, h)) = spikes.iter().find(|(j, _)| *j == i) {
                    high = h;
                }
                if let Some(&(_, l)) = dips.iter().find(|(j, _)| *j == i) {
                    low = l;
                }
                let mid = (high + low) / 2.0;
                Candle::new(i as i64 * 60_000, mid, high, low, mid, 1000.0)
            })
            .collect()
    }

    #[test]
    fn rising_swing_highs_are_bullish_breaks() {
        let candles = window(40, &[(8, 110.0), (20, 112.0), (32, 115.0)], &[]);
        let breaks = StructureBreakDetector::default().detect(&candles);
        assert_eq!(breaks.len(), 2);
        assert_eq!(breaks[0].level, 110.0);
        assert_eq!(breaks[0].index, 20);
        assert_eq!(breaks[1].level, 112.0);
        assert_eq!(breaks[1].index, 32);
        assert!(breaks
            .iter()
            .all(|b| b.direction == Bias::Bullish && b.kind == BreakKind::HigherHigh && b.confirmed));
    }

    #[test]
    fn lower_swing_high_is_not_a_break() {
        let candles = window(40, &[(8, 115.0), (20, 112.0)], &[]);
        assert!(StructureBreakDetector::default().detect(&candles).is_empty());
    }

    #[test]
    fn falling_swing_lows_are_bearish_breaks() {
        let candles = window(40, &[], &[(8, 80.0), (20, 78.0)]);
        let breaks = StructureBreakDetector::default().detect(&candles);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].direction, Bias::Bearish);
        assert_eq!(breaks[0].kind, BreakKind::LowerLow);
        assert_eq!(breaks[0].level, 80.0);
        assert_eq!(breaks[0].index, 20);
    }

    #[test]
    fn breaks_are_ordered_by_confirming_swing() {
        let candles = window(
            50,
            &[(8, 110.0), (20, 112.0), (32, 115.0), (44, 118.0)],
            &[(14, 80.0), (26, 78.0), (38, 75.0)],
        );
        let breaks = StructureBreakDetector::default().detect(&candles);
        let indices: Vec<usize> = breaks.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![20, 26, 32, 38, 44]);
    }

    #[test]
    fn bullish_break_leads_on_shared_index() {
        // Candle 20 is an outside bar: a higher swing high and a lower swing low.
        let candles = window(40, &[(8, 110.0), (20, 112.0)], &[(14, 80.0), (20, 78.0)]);
        let breaks = StructureBreakDetector::default().detect(&candles);
        assert_eq!(breaks.len(), 2);
        assert!(breaks.iter().all(|b| b.index == 20));
        assert_eq!(breaks[0].kind, BreakKind::HigherHigh);
        assert_eq!(breaks[0].level, 110.0);
        assert_eq!(breaks[1].kind, BreakKind::LowerLow);
        assert_eq!(breaks[1].level, 80.0);
    }

    #[test]
    fn keeps_five_most_recent_breaks() {
        let candles = window(
            80,
            &[(8, 110.0), (20, 112.0), (32, 115.0), (44, 118.0), (56, 120.0), (68, 125.0)],
            &[(14, 80.0), (26, 78.0)],
        );
        let breaks = StructureBreakDetector::default().detect(&candles);
        assert_eq!(breaks.len(), MAX_STRUCTURE_BREAKS);
        assert_eq!(breaks[0].index, 26);
        assert_eq!(breaks[0].direction, Bias::Bearish);
        assert_eq!(breaks[4].index, 68);
        assert_eq!(breaks[4].level, 120.0);
    }

    #[test]
    fn short_window_is_empty() {
        let candles = window(19, &[(6, 110.0), (13, 112.0)], &[]);
        assert!(StructureBreakDetector::default().detect(&candles).is_empty());
    }

    #[test]
    fn serializes_kind_as_type() {
        let candles = window(40, &[(8, 110.0), (20, 112.0)], &[]);
        let breaks = StructureBreakDetector::default().detect(&candles);
        let json = serde_json::to_value(breaks[0]).unwrap();
        assert_eq!(json["type"], "higher_high");
        assert_eq!(json["direction"], "bullish");
    }
}
