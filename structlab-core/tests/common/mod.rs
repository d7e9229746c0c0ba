//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use structlab_core::Candle;

pub const MINUTE_MS: i64 = 60_000;

/// Candles from explicit (open, high, low, close) tuples, volume 1000.
pub fn ohlc(data: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| {
            Candle::new(i as i64 * MINUTE_MS, open, high, low, close, 1000.0)
        })
        .collect()
}

/// Piecewise-linear mid prices through `knots` (index, price), one candle per
/// index with a one-unit range around the mid.
pub fn path(knots: &[(usize, f64)]) -> Vec<Candle> {
    let mut mids = Vec::new();
    for pair in knots.windows(2) {
        let ((a, pa), (b, pb)) = (pair[0], pair[1]);
        for i in a..b {
            mids.push(pa + (pb - pa) * (i - a) as f64 / (b - a) as f64);
        }
    }
    if let Some(&(_, last)) = knots.last() {
        mids.push(last);
    }
    let data: Vec<_> = mids.iter().map(|&m| (m, m + 0.5, m - 0.5, m)).collect();
    ohlc(&data)
}

/// Five-wave advance: lows at 6/26/46, highs at 16/36/56.
pub fn five_wave_advance() -> Vec<Candle> {
    path(&[
        (0, 104.0),
        (6, 100.0),
        (16, 110.0),
        (26, 105.0),
        (36, 120.0),
        (46, 112.0),
        (56, 130.0),
        (62, 127.0),
    ])
}

/// Prices fall one unit per candle to `trough`, then rise again.
pub fn v_shape(len: usize, trough: usize) -> Vec<Candle> {
    let data: Vec<_> = (0..len)
        .map(|i| {
            let mid = 100.0 + (i as f64 - trough as f64).abs();
            (mid, mid + 0.5, mid - 0.5, mid)
        })
        .collect();
    ohlc(&data)
}

/// `len` candles rising one unit each; candle `spike` carries `spike_volume`.
pub fn ascending_with_spike(len: usize, spike: usize, spike_volume: f64) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let low = 100.0 + i as f64;
            let volume = if i == spike { spike_volume } else { 100.0 };
            Candle::new(i as i64 * MINUTE_MS, low + 0.2, low + 1.0, low, low + 0.8, volume)
        })
        .collect()
}

/// Seeded random walk with sane OHLC relationships.
pub fn random_walk(len: usize, seed: u64) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut close = 100.0_f64;
    (0..len)
        .map(|i| {
            let open = close;
            close = (open + rng.gen_range(-2.0..2.0)).max(1.0);
            let high = open.max(close) + rng.gen_range(0.0..1.5);
            let low = (open.min(close) - rng.gen_range(0.0..1.5)).max(0.5);
            let volume = rng.gen_range(100.0..5000.0);
            Candle::new(i as i64 * MINUTE_MS, open, high, low, close, volume)
        })
        .collect()
}
