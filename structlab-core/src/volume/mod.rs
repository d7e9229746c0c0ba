//! Volume-profile analysis: histogram, point of control, value area, and the
//! key levels and bias read off them.

pub mod levels;
pub mod profile;

pub use levels::{
    assess_market_position, identify_key_levels, volume_signal, KeyLevels, MarketPosition,
    PositionStructure, VolumeSignal, VolumeSignalDirection,
};
pub use profile::{VolumeBin, VolumeProfile, VolumeProfileBuilder};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::Candle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnalysis {
    /// `None` for an empty window.
    pub volume_profile: Option<VolumeProfile>,
    pub key_levels: KeyLevels,
    pub market_position: MarketPosition,
    pub trading_signal: VolumeSignal,
}

/// Build the profile and derive levels relative to the last close.
pub fn analyze_volume(candles: &[Candle], config: &AnalysisConfig) -> VolumeAnalysis {
    let Some(profile) = VolumeProfileBuilder::from_config(&config.volume).build(candles) else {
        debug!("volume analysis skipped: empty window");
        return VolumeAnalysis::default();
    };

    let reference_price = candles.last().map_or(profile.poc, |c| c.close);
    let key_levels = identify_key_levels(&profile, reference_price, config.volume.key_level_count);
    let market_position = assess_market_position(&key_levels);
    let trading_signal = volume_signal(&market_position);

    debug!(
        candles = candles.len(),
        poc = profile.poc,
        vah = profile.vah,
        val = profile.val,
        structure = ?market_position.structure,
        "volume analysis complete"
    );

    VolumeAnalysis {
        volume_profile: Some(profile),
        key_levels,
        market_position,
        trading_signal,
    }
}
