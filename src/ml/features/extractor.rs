use super::signature::pattern_signature;
use super::stats::{basic_stats, day_time_fraction, peak_time_fraction};
use super::vector::{FeatureVector, FEATURE_COUNT};
use crate::config::FeatureConfig;
use crate::error::{Result, WattsplitError};
use crate::signals::PowerSignal;

/// Reduces a power trace truncated to one cycle to a [`FeatureVector`].
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Features of one cycle. Deterministic for identical input.
    pub fn extract(&self, power: &PowerSignal) -> Result<FeatureVector> {
        let Some((first, last)) = power.range() else {
            return Err(WattsplitError::EmptySignal(
                "Cannot extract features from an empty cycle".to_string(),
            ));
        };

        let real = power.real();
        let reactive = power.reactive();
        let factor = power.power_factor(self.config.power_factor_harmonic)?;
        let timestamps = power.timestamps();

        let mut features = [0.0; FEATURE_COUNT];
        features[0..4].copy_from_slice(&basic_stats(real.values()));
        features[4..8].copy_from_slice(&basic_stats(reactive.values()));
        features[8..12].copy_from_slice(&basic_stats(factor.values()));
        features[12] = last - first;
        features[13] = day_time_fraction((first + last) / 2.0);
        features[14] = peak_time_fraction(reactive.values(), timestamps);
        features[15] = peak_time_fraction(real.values(), timestamps);

        let features = FeatureVector::new(features);
        if !features.is_finite() {
            return Err(WattsplitError::Feature(format!(
                "Non-finite feature for cycle {:.1}s..{:.1}s",
                first, last
            )));
        }

        Ok(features)
    }

    /// Pattern-histogram signature of the power factor trace.
    pub fn power_factor_signature(&self, power: &PowerSignal) -> Result<Vec<f64>> {
        let factor = power.power_factor(self.config.power_factor_harmonic)?;
        Ok(pattern_signature(factor.values(), self.config.signature_row_width))
    }
}
