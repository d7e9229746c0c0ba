//! Symmetric-neighbourhood extremum tests.
//!
//! A candle at index `i` is a swing extreme of radius `r` when its high (or
//! low) dominates the `r` candles on each side. Indices without a full
//! neighbourhood inside the window are never swings.

use crate::domain::Candle;

fn neighbours(candles: &[Candle], i: usize, radius: usize) -> Option<impl Iterator<Item = &Candle>> {
    if i < radius || i + radius >= candles.len() {
        return None;
    }
    Some(candles[i - radius..i].iter().chain(&candles[i + 1..=i + radius]))
}

/// `high[i] >= high[j]` for every neighbour `j`.
pub fn is_swing_high(candles: &[Candle], i: usize, radius: usize) -> bool {
    neighbours(candles, i, radius).is_some_and(|mut n| n.all(|c| candles[i].high >= c.high))
}

/// `low[i] <= low[j]` for every neighbour `j`.
pub fn is_swing_low(candles: &[Candle], i: usize, radius: usize) -> bool {
    neighbours(candles, i, radius).is_some_and(|mut n| n.all(|c| candles[i].low <= c.low))
}

/// `high[i] > high[j]` for every neighbour `j`.
pub fn is_strict_swing_high(candles: &[Candle], i: usize, radius: usize) -> bool {
    neighbours(candles, i, radius).is_some_and(|mut n| n.all(|c| candles[i].high > c.high))
}

/// `low[i] < low[j]` for every neighbour `j`.
pub fn is_strict_swing_low(candles: &[Candle], i: usize, radius: usize) -> bool {
    neighbours(candles, i, radius).is_some_and(|mut n| n.all(|c| candles[i].low < c.low))
}
