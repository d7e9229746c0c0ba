//! Fair value gaps: three-candle imbalances where the outer candles' wicks
//! do not overlap.

use serde::{Deserialize, Serialize};

use super::detector::FeatureDetector;
use crate::bounded::{RecentBuffer, MAX_FAIR_VALUE_GAPS};
use crate::domain::{Bias, Candle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    /// Gaps are point-in-time; fills are not tracked after detection.
    #[default]
    Unfilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairValueGap {
    /// Lower edge of the gap.
    pub start: f64,
    /// Upper edge of the gap.
    pub end: f64,
    #[serde(rename = "type")]
    pub bias: Bias,
    pub status: GapStatus,
    /// Index of the middle candle.
    pub index: usize,
}

impl FairValueGap {
    pub fn size(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_unfilled(&self) -> bool {
        self.status == GapStatus::Unfilled
    }
}

#[derive(Debug, Clone, Default)]
pub struct FairValueGapDetector;

impl FairValueGapDetector {
    pub const MIN_CANDLES: usize = 3;

    fn classify(prev: &Candle, mid: &Candle, next: &Candle) -> Option<(Bias, f64, f64)> {
        if prev.high < next.low && mid.is_bullish() {
            Some((Bias::Bullish, prev.high, next.low))
        } else if prev.low > next.high && mid.is_bearish() {
            Some((Bias::Bearish, next.high, prev.low))
        } else {
            None
        }
    }
}

impl FeatureDetector for FairValueGapDetector {
    type Feature = FairValueGap;

    fn name(&self) -> &str {
        "fair_value_gaps"
    }

    fn min_candles(&self) -> usize {
        Self::MIN_CANDLES
    }

    fn detect(&self, candles: &[Candle]) -> Vec<FairValueGap> {
        if candles.len() < Self::MIN_CANDLES {
            return Vec::new();
        }

        let mut gaps = RecentBuffer::new(MAX_FAIR_VALUE_GAPS);
        gaps.extend(candles.windows(3).enumerate().filter_map(|(i, w)| {
            Self::classify(&w[0], &w[1], &w[2]).map(|(bias, start, end)| FairValueGap {
                start,
                end,
                bias,
                status: GapStatus::Unfilled,
                index: i + 1,
            })
        }));
        gaps.into_vec()
    }
}
