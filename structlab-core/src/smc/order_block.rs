//! Order blocks — large-bodied candles followed by displacement.
//!
//! A bullish block is a strong up candle whose high is exceeded within the
//! next few candles; a bearish block is a strong down candle whose low is
//! undercut. Strength compares the block's volume with the follow-through.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::detector::FeatureDetector;
use crate::bounded::{RecentBuffer, MAX_ORDER_BLOCKS};
use crate::config::SmcConfig;
use crate::domain::{Bias, Candle, SignalStrength};
use crate::math::mean;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    /// Candle low for bullish blocks, candle high for bearish ones.
    pub level: f64,
    #[serde(rename = "type")]
    pub bias: Bias,
    pub strength: SignalStrength,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct OrderBlockDetector {
    body_ratio: f64,
    lookahead: usize,
    strong_volume_ratio: f64,
    medium_volume_ratio: f64,
    min_candles: usize,
}

impl OrderBlockDetector {
    pub fn from_config(config: &SmcConfig) -> Self {
        assert!(config.displacement_lookahead >= 1, "displacement_lookahead must be >= 1");
        Self {
            body_ratio: config.body_ratio,
            lookahead: config.displacement_lookahead,
            strong_volume_ratio: config.strong_volume_ratio,
            medium_volume_ratio: config.medium_volume_ratio,
            min_candles: config.min_candles,
        }
    }

    fn strength(&self, candle: &Candle, follow: &[Candle]) -> SignalStrength {
        let Some(avg_volume) = mean(follow.iter().map(|c| c.volume)) else {
            return SignalStrength::Weak;
        };
        if candle.volume > avg_volume * self.strong_volume_ratio {
            SignalStrength::Strong
        } else if candle.volume > avg_volume * self.medium_volume_ratio {
            SignalStrength::Medium
        } else {
            SignalStrength::Weak
        }
    }

    fn classify(&self, candle: &Candle, follow: &[Candle]) -> Option<(Bias, f64)> {
        if candle.body() < candle.range() * self.body_ratio {
            return None;
        }
        if candle.is_bullish() {
            let next_high = follow.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
            (next_high > candle.high).then_some((Bias::Bullish, candle.low))
        } else if candle.is_bearish() {
            let next_low = follow.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            (next_low < candle.low).then_some((Bias::Bearish, candle.high))
        } else {
            None
        }
    }
}

impl Default for OrderBlockDetector {
    fn default() -> Self {
        Self::from_config(&SmcConfig::default())
    }
}

impl FeatureDetector for OrderBlockDetector {
    type Feature = OrderBlock;

    fn name(&self) -> &str {
        "order_blocks"
    }

    fn min_candles(&self) -> usize {
        self.min_candles.max(2 * self.lookahead + 1)
    }

    fn detect(&self, candles: &[Candle]) -> Vec<OrderBlock> {
        if candles.len() < self.min_candles() {
            return Vec::new();
        }

        let mut blocks = RecentBuffer::new(MAX_ORDER_BLOCKS);
        for i in self.lookahead..candles.len() - self.lookahead {
            let candle = &candles[i];
            let follow = &candles[i + 1..=i + self.lookahead];
            if let Some((bias, level)) = self.classify(candle, follow) {
                let strength = self.strength(candle, follow);
                trace!(index = i, %bias, ?strength, level, "order block");
                blocks.push(OrderBlock {
                    level,
                    bias,
                    strength,
                    index: i,
                });
            }
        }
        blocks.into_vec()
    }
}
