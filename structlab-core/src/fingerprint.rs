//! Deterministic identification of analysis inputs.
//!
//! - `WindowHash`: content hash of a candle window (bit-exact over all fields).
//! - `ConfigHash`: hash of the canonical JSON form of an [`AnalysisConfig`].
//!
//! Both are BLAKE3 hex digests, stable across builds and platforms, so a
//! downstream store can deduplicate reports by `(window_hash, config_hash)`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AnalysisConfig;
use crate::domain::Candle;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHash(pub String);

impl WindowHash {
    pub fn of(candles: &[Candle]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(candles.len() as u64).to_le_bytes());
        for c in candles {
            hasher.update(&c.timestamp.to_le_bytes());
            for value in [c.open, c.high, c.low, c.close, c.volume] {
                hasher.update(&value.to_bits().to_le_bytes());
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }
}

impl fmt::Display for WindowHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigHash(pub String);

impl ConfigHash {
    pub fn of(config: &AnalysisConfig) -> Self {
        // Struct fields serialize in declaration order, so the JSON is canonical.
        let canonical = serde_json::to_vec(config).unwrap_or_default();
        Self(blake3::hash(&canonical).to_hex().to_string())
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
