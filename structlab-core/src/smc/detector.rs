//! Shared contract for the smart-money scanners.

use crate::domain::Candle;

/// A single-pass scanner that turns a candle window into a feature list.
///
/// Detectors are stateless: `detect` depends only on the window and the
/// detector's own parameters. Windows shorter than `min_candles()` yield an
/// empty list, never an error.
pub trait FeatureDetector: Send + Sync {
    type Feature;

    /// Human-readable name (e.g., "order_blocks").
    fn name(&self) -> &str;

    /// Shortest window that can produce a feature.
    fn min_candles(&self) -> usize;

    /// Features ordered oldest to newest, truncated to the detector's bound.
    fn detect(&self, candles: &[Candle]) -> Vec<Self::Feature>;
}
