//! Levels, positioning and bias derived from a volume profile.

use serde::{Deserialize, Serialize};

use super::profile::VolumeProfile;
use crate::domain::SignalStrength;

/// Support/resistance levels reported per side.
pub const MAX_SIDE_LEVELS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    /// Highest-volume bin prices, highest volume first.
    pub high_volume_levels: Vec<f64>,
    /// High-volume levels below the reference price, nearest first.
    pub support_levels: Vec<f64>,
    /// High-volume levels above the reference price, nearest first.
    pub resistance_levels: Vec<f64>,
}

impl KeyLevels {
    pub fn is_empty(&self) -> bool {
        self.support_levels.is_empty() && self.resistance_levels.is_empty()
    }
}

/// Select the `count` highest-volume bins and split them around
/// `reference_price`.
pub fn identify_key_levels(
    profile: &VolumeProfile,
    reference_price: f64,
    count: usize,
) -> KeyLevels {
    // Rounded bin prices can coincide on very narrow windows.
    let mut high_volume_levels: Vec<f64> = Vec::with_capacity(count);
    for bin in profile.bins_by_volume() {
        if high_volume_levels.len() == count {
            break;
        }
        if !high_volume_levels.contains(&bin.price) {
            high_volume_levels.push(bin.price);
        }
    }

    let mut support_levels: Vec<f64> = high_volume_levels
        .iter()
        .copied()
        .filter(|&p| p < reference_price)
        .collect();
    support_levels.sort_by(|a, b| b.total_cmp(a));
    support_levels.truncate(MAX_SIDE_LEVELS);

    let mut resistance_levels: Vec<f64> = high_volume_levels
        .iter()
        .copied()
        .filter(|&p| p > reference_price)
        .collect();
    resistance_levels.sort_by(|a, b| a.total_cmp(b));
    resistance_levels.truncate(MAX_SIDE_LEVELS);

    KeyLevels {
        high_volume_levels,
        support_levels,
        resistance_levels,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStructure {
    Accumulation,
    Distribution,
    Consolidation,
    #[default]
    Undefined,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPosition {
    pub structure: PositionStructure,
    pub nearest_support: Option<f64>,
    pub nearest_resistance: Option<f64>,
    pub support_strength: usize,
    pub resistance_strength: usize,
}

/// More high-volume support than resistance reads as accumulation, the
/// reverse as distribution, a balance as consolidation.
pub fn assess_market_position(levels: &KeyLevels) -> MarketPosition {
    if levels.is_empty() {
        return MarketPosition::default();
    }

    let supports = levels.support_levels.len();
    let resistances = levels.resistance_levels.len();
    let structure = match supports.cmp(&resistances) {
        std::cmp::Ordering::Greater => PositionStructure::Accumulation,
        std::cmp::Ordering::Less => PositionStructure::Distribution,
        std::cmp::Ordering::Equal => PositionStructure::Consolidation,
    };

    MarketPosition {
        structure,
        nearest_support: levels.support_levels.iter().copied().reduce(f64::max),
        nearest_resistance: levels.resistance_levels.iter().copied().reduce(f64::min),
        support_strength: supports,
        resistance_strength: resistances,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSignalDirection {
    Bullish,
    Bearish,
    Range,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSignal {
    pub direction: VolumeSignalDirection,
    pub strength: SignalStrength,
    pub entry_zone: Option<f64>,
}

impl Default for VolumeSignal {
    fn default() -> Self {
        Self {
            direction: VolumeSignalDirection::Neutral,
            strength: SignalStrength::Weak,
            entry_zone: None,
        }
    }
}

pub fn volume_signal(position: &MarketPosition) -> VolumeSignal {
    match position.structure {
        PositionStructure::Accumulation => VolumeSignal {
            direction: VolumeSignalDirection::Bullish,
            strength: SignalStrength::Strong,
            entry_zone: position.nearest_support,
        },
        PositionStructure::Distribution => VolumeSignal {
            direction: VolumeSignalDirection::Bearish,
            strength: SignalStrength::Strong,
            entry_zone: position.nearest_resistance,
        },
        PositionStructure::Consolidation => VolumeSignal {
            direction: VolumeSignalDirection::Range,
            strength: SignalStrength::Medium,
            entry_zone: None,
        },
        PositionStructure::Undefined => VolumeSignal::default(),
    }
}
