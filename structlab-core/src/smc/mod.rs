//! Smart-money-concept (SMC) structure analysis.
//!
//! Four independent scanners share the [`FeatureDetector`] contract:
//! - [`OrderBlockDetector`]: large-bodied candles confirmed by displacement
//! - [`FairValueGapDetector`]: three-candle wick gaps
//! - [`StructureBreakDetector`]: higher highs and lower lows between swings
//! - [`LiquidityZoneDetector`]: sweeps of the preceding candles' extremes
//!
//! [`aggregate_signals`] turns their output into a single directional verdict.

pub mod aggregator;
pub mod detector;
pub mod fair_value_gap;
pub mod liquidity;
pub mod order_block;
pub mod structure_break;

pub use aggregator::{aggregate_signals, MarketStructure, SmcSignal};
pub use detector::FeatureDetector;
pub use fair_value_gap::{FairValueGap, FairValueGapDetector, GapStatus};
pub use liquidity::{LiquidityZone, LiquidityZoneDetector, ZoneKind};
pub use order_block::{OrderBlock, OrderBlockDetector};
pub use structure_break::{BreakKind, StructureBreak, StructureBreakDetector};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::Candle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartMoneyAnalysis {
    pub order_blocks: Vec<OrderBlock>,
    pub fair_value_gaps: Vec<FairValueGap>,
    pub structure_breaks: Vec<StructureBreak>,
    pub liquidity_zones: Vec<LiquidityZone>,
    pub smc_signals: SmcSignal,
}

/// Run all four scanners over `candles` and aggregate their output.
pub fn analyze_smart_money(candles: &[Candle], config: &AnalysisConfig) -> SmartMoneyAnalysis {
    let order_blocks = OrderBlockDetector::from_config(&config.smc).detect(candles);
    let fair_value_gaps = FairValueGapDetector.detect(candles);
    let structure_breaks = StructureBreakDetector::from_config(&config.smc).detect(candles);
    let liquidity_zones = LiquidityZoneDetector::from_config(&config.smc).detect(candles);

    let smc_signals = aggregate_signals(
        &order_blocks,
        &fair_value_gaps,
        &structure_breaks,
        &liquidity_zones,
    );

    debug!(
        candles = candles.len(),
        order_blocks = order_blocks.len(),
        fair_value_gaps = fair_value_gaps.len(),
        structure_breaks = structure_breaks.len(),
        liquidity_zones = liquidity_zones.len(),
        market_structure = ?smc_signals.market_structure,
        "smart money analysis complete"
    );

    SmartMoneyAnalysis {
        order_blocks,
        fair_value_gaps,
        structure_breaks,
        liquidity_zones,
        smc_signals,
    }
}
