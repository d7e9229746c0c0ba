//! Analysis configuration — every heuristic threshold in one place.
//!
//! Stored as TOML. Every section and field has a default, so a config file
//! only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Pivot detection for wave labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotConfig {
    /// Half-window radius of the symmetric extremum test.
    pub radius: usize,
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self { radius: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Windows shorter than this produce an empty wave structure.
    pub min_candles: usize,
    /// Number of trailing closes fitted by the trend regression.
    pub trend_lookback: usize,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            min_candles: 20,
            trend_lookback: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Synthetic price points each candle's volume is spread across.
    pub points_per_candle: usize,
    /// Histogram bins spanning the window's price range.
    pub bins: usize,
    /// Share of total volume the value area must hold.
    pub value_area_fraction: f64,
    /// Highest-volume bins reported as key levels.
    pub key_level_count: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            points_per_candle: 10,
            bins: 50,
            value_area_fraction: 0.68,
            key_level_count: 10,
        }
    }
}

/// Smart-money detector thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmcConfig {
    /// Minimum body / range ratio for an order-block candle.
    pub body_ratio: f64,
    /// Candles after an order-block candle checked for displacement.
    pub displacement_lookahead: usize,
    /// Volume ratio above which an order block is strong.
    pub strong_volume_ratio: f64,
    /// Volume ratio above which an order block is medium.
    pub medium_volume_ratio: f64,
    /// Minimum window for order blocks and liquidity zones.
    pub min_candles: usize,
    /// Radius of the swing test used for structure breaks.
    pub swing_radius: usize,
    /// Minimum window for structure breaks.
    pub structure_min_candles: usize,
    /// Preceding candles whose extremes define a liquidity pool.
    pub liquidity_lookback: usize,
}

impl Default for SmcConfig {
    fn default() -> Self {
        Self {
            body_ratio: 0.6,
            displacement_lookahead: 3,
            strong_volume_ratio: 1.5,
            medium_volume_ratio: 1.0,
            min_candles: 10,
            swing_radius: 5,
            structure_min_candles: 20,
            liquidity_lookback: 5,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub pivots: PivotConfig,
    pub waves: WaveConfig,
    pub volume: VolumeConfig,
    pub smc: SmcConfig,
}

impl AnalysisConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the detectors cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.pivots.radius == 0 {
            return Err(invalid("pivots.radius", "must be >= 1"));
        }
        if self.waves.trend_lookback < 2 {
            return Err(invalid("waves.trend_lookback", "must be >= 2"));
        }
        if self.volume.points_per_candle < 2 {
            return Err(invalid("volume.points_per_candle", "must be >= 2"));
        }
        if self.volume.bins == 0 {
            return Err(invalid("volume.bins", "must be >= 1"));
        }
        let fraction = self.volume.value_area_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(invalid(
                "volume.value_area_fraction",
                format!("{fraction} is outside (0, 1]"),
            ));
        }
        let body_ratio = self.smc.body_ratio;
        if !(body_ratio > 0.0 && body_ratio <= 1.0) {
            return Err(invalid(
                "smc.body_ratio",
                format!("{body_ratio} is outside (0, 1]"),
            ));
        }
        if self.smc.displacement_lookahead == 0 {
            return Err(invalid("smc.displacement_lookahead", "must be >= 1"));
        }
        if self.smc.strong_volume_ratio < self.smc.medium_volume_ratio {
            return Err(invalid(
                "smc.strong_volume_ratio",
                "must be >= smc.medium_volume_ratio",
            ));
        }
        if self.smc.swing_radius == 0 {
            return Err(invalid("smc.swing_radius", "must be >= 1"));
        }
        if self.smc.liquidity_lookback == 0 {
            return Err(invalid("smc.liquidity_lookback", "must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pivots.radius, 5);
        assert_eq!(config.volume.bins, 50);
        assert_eq!(config.volume.value_area_fraction, 0.68);
        assert_eq!(config.smc.body_ratio, 0.6);
        assert_eq!(config.smc.displacement_lookahead, 3);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [pivots]
            radius = 3

            [volume]
            value_area_fraction = 0.7
            "#,
        )
        .unwrap();
        assert_eq!(config.pivots.radius, 3);
        assert_eq!(config.volume.value_area_fraction, 0.7);
        assert_eq!(config.volume.bins, 50);
        assert_eq!(config.smc, SmcConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn toml_roundtrip() {
        let config = AnalysisConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[smc]"));
        let parsed = AnalysisConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn rejects_zero_radius() {
        let err = AnalysisConfig::from_toml_str("[pivots]\nradius = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "pivots.radius",
                ..
            }
        ));
    }

    #[test]
    fn rejects_value_area_fraction_out_of_range() {
        let mut config = AnalysisConfig::default();
        config.volume.value_area_fraction = 1.5;
        assert!(config.validate().is_err());
        config.volume.value_area_fraction = 0.0;
        assert!(config.validate().is_err());
        config.volume.value_area_fraction = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_volume_ratios() {
        let mut config = AnalysisConfig::default();
        config.smc.strong_volume_ratio = 0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("smc.strong_volume_ratio"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = AnalysisConfig::from_toml_str("[pivots\nradius = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/structlab.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/structlab.toml"));
    }
}
