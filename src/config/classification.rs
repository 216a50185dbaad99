use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::WattsplitError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub metric: SimilarityMetric,
    pub threshold: f64,
}

/// Scoring convention used to compare standardized feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMetric {
    /// `||a - b|| / (||a|| + ||b||)`, in `[0, 1]`, lower is better; accept below threshold.
    NormalizedEuclidean,
    /// Cosine similarity, in `[-1, 1]`, higher is better; accept above threshold.
    Cosine,
}

impl SimilarityMetric {
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Self::NormalizedEuclidean)
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            metric: SimilarityMetric::NormalizedEuclidean,
            threshold: 0.8,
        }
    }
}

impl ConfigSection for ClassificationConfig {
    fn section_name() -> &'static str {
        "classification"
    }

    fn validate(&self) -> Result<(), WattsplitError> {
        let valid = match self.metric {
            SimilarityMetric::NormalizedEuclidean => (0.0..=1.0).contains(&self.threshold),
            SimilarityMetric::Cosine => (-1.0..=1.0).contains(&self.threshold),
        };
        if !valid {
            return Err(WattsplitError::Configuration(format!(
                "Threshold {} is outside the range of {:?}",
                self.threshold, self.metric
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Classification".to_string(),
            fields: vec![
                FieldManifest::new(
                    "metric",
                    "enum",
                    serde_json::json!(self.metric),
                    (None, None),
                    "NormalizedEuclidean or Cosine",
                ),
                FieldManifest::new(
                    "threshold",
                    "float",
                    serde_json::json!(self.threshold),
                    (Some(-1.0), Some(1.0)),
                    "Acceptance threshold for the winning appliance score",
                ),
            ],
        }
    }
}
