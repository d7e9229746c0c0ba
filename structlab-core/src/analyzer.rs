//! Top-level entry points over one configured engine.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AnalysisConfig, ConfigError};
use crate::domain::Candle;
use crate::fingerprint::{ConfigHash, WindowHash};
use crate::smc::{analyze_smart_money, SmartMoneyAnalysis};
use crate::support_resistance::{detect_support_resistance, SupportResistance};
use crate::volume::{analyze_volume, VolumeAnalysis};
use crate::waves::{analyze_waves, WaveAnalysis};

/// Every analysis of one window, tagged with the hashes of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub window_hash: WindowHash,
    pub config_hash: ConfigHash,
    pub candle_count: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub waves: WaveAnalysis,
    pub volume: VolumeAnalysis,
    pub smart_money: SmartMoneyAnalysis,
    pub support_resistance: SupportResistance,
}

/// Stateless analysis engine holding an immutable configuration.
///
/// Each entry point is a pure function of the window passed in; one analyzer
/// may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalyzer {
    config: AnalysisConfig,
}

impl MarketAnalyzer {
    /// Build an analyzer around a validated `config`.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze_waves(&self, candles: &[Candle]) -> WaveAnalysis {
        analyze_waves(candles, &self.config)
    }

    pub fn analyze_volume(&self, candles: &[Candle]) -> VolumeAnalysis {
        analyze_volume(candles, &self.config)
    }

    pub fn analyze_smart_money(&self, candles: &[Candle]) -> SmartMoneyAnalysis {
        analyze_smart_money(candles, &self.config)
    }

    pub fn support_resistance(&self, candles: &[Candle]) -> SupportResistance {
        detect_support_resistance(candles)
    }

    /// Run every analysis over `candles`.
    pub fn analyze(&self, candles: &[Candle]) -> MarketReport {
        let report = MarketReport {
            window_hash: WindowHash::of(candles),
            config_hash: ConfigHash::of(&self.config),
            candle_count: candles.len(),
            first_timestamp: candles.first().map(|c| c.timestamp),
            last_timestamp: candles.last().map(|c| c.timestamp),
            waves: self.analyze_waves(candles),
            volume: self.analyze_volume(candles),
            smart_money: self.analyze_smart_money(candles),
            support_resistance: self.support_resistance(candles),
        };
        debug!(window = %report.window_hash, candles = report.candle_count, "report built");
        report
    }

    /// Analyze many windows in parallel. Output order matches input order.
    pub fn analyze_batch<W>(&self, windows: &[W]) -> Vec<MarketReport>
    where
        W: AsRef<[Candle]> + Sync,
    {
        windows
            .par_iter()
            .map(|window| self.analyze(window.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_candles;

    fn zigzag(len: usize, offset: f64) -> Vec<Candle> {
        let closes: Vec<f64> = (0..len)
            .map(|i| {
                let phase = (i % 12) as f64;
                let swing = if phase < 6.0 { phase } else { 12.0 - phase };
                offset + 0.3 * i as f64 + 2.0 * swing
            })
            .collect();
        make_candles(&closes)
    }

    #[test]
    fn report_covers_window() {
        let candles = zigzag(60, 100.0);
        let report = MarketAnalyzer::default().analyze(&candles);
        assert_eq!(report.candle_count, 60);
        assert_eq!(report.first_timestamp, Some(0));
        assert_eq!(report.last_timestamp, Some(59 * 60_000));
        assert!(report.volume.volume_profile.is_some());
        assert!(!report.waves.wave_structure.pivots.is_empty());
    }

    #[test]
    fn empty_window_report() {
        let report = MarketAnalyzer::default().analyze(&[]);
        assert_eq!(report.candle_count, 0);
        assert_eq!(report.first_timestamp, None);
        assert!(report.waves.wave_structure.is_empty());
        assert_eq!(report.waves.current_wave, 1);
        assert!(report.volume.volume_profile.is_none());
        assert_eq!(report.smart_money, SmartMoneyAnalysis::default());
    }

    #[test]
    fn entry_points_match_report_sections() {
        let candles = zigzag(50, 200.0);
        let analyzer = MarketAnalyzer::default();
        let report = analyzer.analyze(&candles);
        assert_eq!(report.waves, analyzer.analyze_waves(&candles));
        assert_eq!(report.volume, analyzer.analyze_volume(&candles));
        assert_eq!(report.smart_money, analyzer.analyze_smart_money(&candles));
    }

    #[test]
    fn batch_preserves_order() {
        let windows: Vec<Vec<Candle>> = (0..8).map(|k| zigzag(40 + k, 100.0 * (k + 1) as f64)).collect();
        let analyzer = MarketAnalyzer::default();
        let reports = analyzer.analyze_batch(&windows);
        assert_eq!(reports.len(), windows.len());
        for (report, window) in reports.iter().zip(&windows) {
            assert_eq!(report, &analyzer.analyze(window));
        }
    }

    #[test]
    fn config_changes_config_hash_only() {
        let candles = zigzag(40, 100.0);
        let mut config = AnalysisConfig::default();
        config.smc.body_ratio = 0.8;
        let a = MarketAnalyzer::default().analyze(&candles);
        let b = MarketAnalyzer::new(config).unwrap().analyze(&candles);
        assert_eq!(a.window_hash, b.window_hash);
        assert_ne!(a.config_hash, b.config_hash);
    }

    #[test]
    fn unchecked_config_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.volume.bins = 0;
        let err = MarketAnalyzer::new(config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "volume.bins", .. }));

        let mut config = AnalysisConfig::default();
        config.smc.swing_radius = 0;
        assert!(MarketAnalyzer::new(config).is_err());
    }
}
