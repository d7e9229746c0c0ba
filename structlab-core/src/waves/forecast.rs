//! Price targets for the wave in progress.

use serde::{Deserialize, Serialize};

use super::fibonacci::FibonacciLevels;
use super::wave::MAX_WAVES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Wave expected after the current one; wraps to 1 after wave 5.
    pub next_wave: u8,
    pub targets: Vec<f64>,
}

/// Wave 3 targets the 1.618 and 2.618 extensions, wave 4 the 0.382 and
/// 0.618 levels; other waves have no targets.
///
/// `None` when there are no Fibonacci levels to project from.
pub fn project_forecast(current_wave: u8, levels: &FibonacciLevels) -> Option<Forecast> {
    if levels.is_empty() {
        return None;
    }

    let next_wave = if (current_wave as usize) < MAX_WAVES {
        current_wave + 1
    } else {
        1
    };

    let ratios: &[f64] = match current_wave {
        3 => &[1.618, 2.618],
        4 => &[0.382, 0.618],
        _ => &[],
    };
    let targets = ratios.iter().filter_map(|&r| levels.get(r)).collect();

    Some(Forecast { next_wave, targets })
}
