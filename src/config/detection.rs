use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::WattsplitError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub baseline_window: usize,      // idle samples kept for the rolling baseline
    pub baseline_percentile: f64,    // e.g., 0.05 = 5th percentile of the window
    pub rise_threshold_ratio: f64,   // edge size relative to |baseline|
    pub min_rise_watts: f64,         // absolute floor on the edge size
    pub hysteresis_ratio: f64,       // share of the rise a trace must drop to end a cycle
    pub min_cycle_duration_secs: f64,
    pub merge_gap_secs: f64,         // cycles closer than this are merged
    pub require_noise_corroboration: bool,
    pub noise_burst_ratio: f64,      // HF burst = average magnitude above ratio * median
    pub noise_search_window_secs: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            baseline_window: 30,
            baseline_percentile: 0.05,
            rise_threshold_ratio: 0.1,
            min_rise_watts: 30.0,
            hysteresis_ratio: 0.5,
            min_cycle_duration_secs: 5.0,
            merge_gap_secs: 0.0,
            require_noise_corroboration: false,
            noise_burst_ratio: 2.0,
            noise_search_window_secs: 2.0,
        }
    }
}

impl ConfigSection for DetectionConfig {
    fn section_name() -> &'static str {
        "detection"
    }

    fn validate(&self) -> Result<(), WattsplitError> {
        if self.baseline_window == 0 {
            return Err(WattsplitError::Configuration(
                "Baseline window must hold at least one sample".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.baseline_percentile) {
            return Err(WattsplitError::Configuration(
                "Baseline percentile must be between 0 and 1".to_string(),
            ));
        }
        if self.rise_threshold_ratio < 0.0 || self.min_rise_watts < 0.0 {
            return Err(WattsplitError::Configuration(
                "Rise thresholds must be non-negative".to_string(),
            ));
        }
        if self.rise_threshold_ratio == 0.0 && self.min_rise_watts == 0.0 {
            return Err(WattsplitError::Configuration(
                "At least one rise threshold must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.hysteresis_ratio) {
            return Err(WattsplitError::Configuration(
                "Hysteresis ratio must be in [0, 1)".to_string(),
            ));
        }
        if self.min_cycle_duration_secs < 0.0 || self.merge_gap_secs < 0.0 {
            return Err(WattsplitError::Configuration(
                "Durations must be non-negative".to_string(),
            ));
        }
        if self.noise_burst_ratio <= 0.0 || self.noise_search_window_secs < 0.0 {
            return Err(WattsplitError::Configuration(
                "Noise burst ratio must be positive and search window non-negative".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Detection".to_string(),
            fields: vec![
                FieldManifest::new(
                    "baseline_window",
                    "integer",
                    serde_json::json!(self.baseline_window),
                    (Some(1.0), None),
                    "Idle samples kept for the rolling baseline",
                ),
                FieldManifest::new(
                    "baseline_percentile",
                    "float",
                    serde_json::json!(self.baseline_percentile),
                    (Some(0.0), Some(1.0)),
                    "Percentile of the idle window used as baseline",
                ),
                FieldManifest::new(
                    "rise_threshold_ratio",
                    "float",
                    serde_json::json!(self.rise_threshold_ratio),
                    (Some(0.0), None),
                    "Rising edge size relative to the baseline",
                ),
                FieldManifest::new(
                    "min_rise_watts",
                    "float",
                    serde_json::json!(self.min_rise_watts),
                    (Some(0.0), None),
                    "Smallest rising edge in watts",
                ),
                FieldManifest::new(
                    "hysteresis_ratio",
                    "float",
                    serde_json::json!(self.hysteresis_ratio),
                    (Some(0.0), Some(1.0)),
                    "Share of the rising edge the trace must drop to end a cycle",
                ),
                FieldManifest::new(
                    "min_cycle_duration_secs",
                    "float",
                    serde_json::json!(self.min_cycle_duration_secs),
                    (Some(0.0), None),
                    "Shorter cycles are discarded as spikes",
                ),
                FieldManifest::new(
                    "merge_gap_secs",
                    "float",
                    serde_json::json!(self.merge_gap_secs),
                    (Some(0.0), None),
                    "Cycles separated by less than this are merged",
                ),
                FieldManifest::new(
                    "require_noise_corroboration",
                    "bool",
                    serde_json::json!(self.require_noise_corroboration),
                    (None, None),
                    "Keep only cycles whose ON edge coincides with an HF noise burst",
                ),
                FieldManifest::new(
                    "noise_burst_ratio",
                    "float",
                    serde_json::json!(self.noise_burst_ratio),
                    (Some(0.0), None),
                    "HF average above this multiple of its median counts as a burst",
                ),
                FieldManifest::new(
                    "noise_search_window_secs",
                    "float",
                    serde_json::json!(self.noise_search_window_secs),
                    (Some(0.0), None),
                    "Seconds around the ON edge searched for a burst",
                ),
            ],
        }
    }
}
