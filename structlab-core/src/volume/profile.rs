//! Volume profile — synthetic intrabar volume binned by price.
//!
//! Trade-level data is not available, so each candle's volume is spread
//! evenly over equally spaced prices between its low and high. The pooled
//! points are then histogrammed over the window's full price span.

use serde::{Deserialize, Serialize};

use crate::config::VolumeConfig;
use crate::domain::Candle;
use crate::math::round2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBin {
    /// Bin centre, rounded to 2 decimals.
    pub price: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// Point of control: price of the highest-volume bin.
    pub poc: f64,
    /// Value area high.
    pub vah: f64,
    /// Value area low.
    pub val: f64,
    /// Bins in ascending price order.
    pub distribution: Vec<VolumeBin>,
}

impl VolumeProfile {
    pub fn total_volume(&self) -> f64 {
        self.distribution.iter().map(|b| b.volume).sum()
    }

    /// Bins sorted by volume, highest first. Equal volumes keep price order.
    pub fn bins_by_volume(&self) -> Vec<VolumeBin> {
        let mut bins = self.distribution.clone();
        bins.sort_by(|a, b| b.volume.total_cmp(&a.volume));
        bins
    }
}

#[derive(Debug, Clone)]
pub struct VolumeProfileBuilder {
    points_per_candle: usize,
    bins: usize,
    value_area_fraction: f64,
}

impl VolumeProfileBuilder {
    pub fn new(points_per_candle: usize, bins: usize, value_area_fraction: f64) -> Self {
        assert!(points_per_candle >= 2, "points_per_candle must be >= 2");
        assert!(bins >= 1, "bins must be >= 1");
        assert!(
            value_area_fraction > 0.0 && value_area_fraction <= 1.0,
            "value_area_fraction must be in (0, 1]"
        );
        Self {
            points_per_candle,
            bins,
            value_area_fraction,
        }
    }

    pub fn from_config(config: &VolumeConfig) -> Self {
        Self::new(
            config.points_per_candle,
            config.bins,
            config.value_area_fraction,
        )
    }

    /// `None` for an empty window.
    pub fn build(&self, candles: &[Candle]) -> Option<VolumeProfile> {
        let points = self.price_points(candles);
        if points.is_empty() {
            return None;
        }

        let min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        // A window with no price span has a single price, hence a single bin.
        let bins = if max > min { self.bins } else { 1 };
        let width = (max - min) / bins as f64;

        // The last bin is closed on the right so the maximum price is counted.
        let mut volumes = vec![0.0; bins];
        for &(price, volume) in &points {
            let idx = if width > 0.0 {
                (((price - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            volumes[idx] += volume;
        }

        let distribution: Vec<VolumeBin> = volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| VolumeBin {
                price: round2(min + width * (i as f64 + 0.5)),
                volume,
            })
            .collect();

        let poc_idx = distribution
            .iter()
            .enumerate()
            .fold(0, |best, (i, bin)| {
                if bin.volume > distribution[best].volume {
                    i
                } else {
                    best
                }
            });
        let poc = distribution[poc_idx].price;
        let (vah, val) = self.value_area(&distribution, poc);

        Some(VolumeProfile {
            poc,
            vah,
            val,
            distribution,
        })
    }

    /// Walk bins from highest to lowest volume until the running total reaches
    /// the value-area fraction; VAH/VAL are the extreme prices among the bins
    /// taken. The bins taken need not be contiguous around the POC.
    fn value_area(&self, distribution: &[VolumeBin], poc: f64) -> (f64, f64) {
        let total: f64 = distribution.iter().map(|b| b.volume).sum();
        let target = total * self.value_area_fraction;

        let mut order: Vec<&VolumeBin> = distribution.iter().collect();
        order.sort_by(|a, b| b.volume.total_cmp(&a.volume));

        let (mut vah, mut val) = (poc, poc);
        let mut cumulative = 0.0;
        for bin in order {
            cumulative += bin.volume;
            vah = vah.max(bin.price);
            val = val.min(bin.price);
            if cumulative >= target {
                break;
            }
        }
        (vah, val)
    }

    /// `(price, volume)` pairs: each candle's volume split evenly across
    /// `points_per_candle` prices from low to high inclusive.
    fn price_points(&self, candles: &[Candle]) -> Vec<(f64, f64)> {
        let n = self.points_per_candle;
        let steps = (n - 1) as f64;
        let mut points = Vec::with_capacity(candles.len() * n);
        for candle in candles {
            let share = candle.volume / n as f64;
            let step = (candle.high - candle.low) / steps;
            for k in 0..n {
                let price = if k == n - 1 {
                    candle.high
                } else {
                    candle.low + step * k as f64
                };
                points.push((price, share));
            }
        }
        points
    }
}

impl Default for VolumeProfileBuilder {
    fn default() -> Self {
        Self::from_config(&VolumeConfig::default())
    }
}
