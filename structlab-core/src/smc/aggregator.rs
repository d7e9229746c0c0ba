//! Directional verdict from the four smart-money feature lists.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::fair_value_gap::FairValueGap;
use super::liquidity::LiquidityZone;
use super::order_block::OrderBlock;
use super::structure_break::StructureBreak;
use crate::bounded::tail;
use crate::domain::{Bias, SignalStrength};

/// Most recent order blocks that may vote.
pub const ORDER_BLOCK_VOTERS: usize = 3;
/// Most recent structure breaks that may vote.
pub const STRUCTURE_BREAK_VOTERS: usize = 2;
/// Winning vote count at which a shift is reported as strong.
pub const STRONG_VOTE_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStructure {
    BullishShift,
    BearishShift,
    #[default]
    Consolidation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmcSignal {
    pub market_structure: MarketStructure,
    pub signal_strength: SignalStrength,
    pub bullish_votes: usize,
    pub bearish_votes: usize,
    /// Unfilled gaps of either direction.
    pub unfilled_gaps: usize,
}

impl Default for SmcSignal {
    fn default() -> Self {
        Self {
            market_structure: MarketStructure::Consolidation,
            signal_strength: SignalStrength::Weak,
            bullish_votes: 0,
            bearish_votes: 0,
            unfilled_gaps: 0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    bullish: usize,
    bearish: usize,
}

impl Tally {
    fn vote(&mut self, bias: Bias) {
        match bias {
            Bias::Bullish => self.bullish += 1,
            Bias::Bearish => self.bearish += 1,
        }
    }
}

/// Combine the feature lists into one verdict.
///
/// Votes: each of the last three order blocks of medium or strong strength,
/// each of the last two confirmed structure breaks, and one vote for
/// whichever side has more unfilled gaps. Liquidity zones are reported by
/// the scanners but cast no vote.
pub fn aggregate_signals(
    order_blocks: &[OrderBlock],
    fair_value_gaps: &[FairValueGap],
    structure_breaks: &[StructureBreak],
    liquidity_zones: &[LiquidityZone],
) -> SmcSignal {
    let mut tally = Tally::default();

    for block in tail(order_blocks, ORDER_BLOCK_VOTERS) {
        if block.strength.is_significant() {
            tally.vote(block.bias);
        }
    }

    for brk in tail(structure_breaks, STRUCTURE_BREAK_VOTERS) {
        if brk.confirmed {
            tally.vote(brk.direction);
        }
    }

    let unfilled = || fair_value_gaps.iter().filter(|g| g.is_unfilled());
    let bullish_gaps = unfilled().filter(|g| g.bias == Bias::Bullish).count();
    let bearish_gaps = unfilled().filter(|g| g.bias == Bias::Bearish).count();
    if bullish_gaps > bearish_gaps {
        tally.vote(Bias::Bullish);
    } else if bearish_gaps > bullish_gaps {
        tally.vote(Bias::Bearish);
    }

    let strength_for = |votes: usize| {
        if votes >= STRONG_VOTE_THRESHOLD {
            SignalStrength::Strong
        } else {
            SignalStrength::Medium
        }
    };
    let (market_structure, signal_strength) = match tally.bullish.cmp(&tally.bearish) {
        std::cmp::Ordering::Greater => (MarketStructure::BullishShift, strength_for(tally.bullish)),
        std::cmp::Ordering::Less => (MarketStructure::BearishShift, strength_for(tally.bearish)),
        std::cmp::Ordering::Equal => (MarketStructure::Consolidation, SignalStrength::Weak),
    };

    trace!(
        bullish = tally.bullish,
        bearish = tally.bearish,
        liquidity_zones = liquidity_zones.len(),
        ?market_structure,
        "smc votes"
    );

    SmcSignal {
        market_structure,
        signal_strength,
        bullish_votes: tally.bullish,
        bearish_votes: tally.bearish,
        unfilled_gaps: bullish_gaps + bearish_gaps,
    }
}
