use crate::error::{Result, WattsplitError};
use crate::ml::features::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Per-dimension standardization (zero mean, unit variance).
///
/// Fit once on the training corpus and reused unchanged for every inference.
/// Dimensions without spread keep a scale of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn fit(rows: &[FeatureVector]) -> Result<Self> {
        let mean = FeatureVector::mean_of(rows)
            .ok_or_else(|| {
                WattsplitError::Classification("Cannot fit a scaler on zero rows".to_string())
            })?
            .values()
            .to_owned();

        let n = rows.len() as f64;
        let mut scale = [0.0; FEATURE_COUNT];
        for (dim, s) in scale.iter_mut().enumerate() {
            let variance = rows
                .iter()
                .map(|row| (row.values()[dim] - mean[dim]).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            *s = if std > 0.0 && std.is_finite() { std } else { 1.0 };
        }

        Ok(Self { mean, scale })
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = *features.values();
        for (dim, v) in out.iter_mut().enumerate() {
            *v = (*v - self.mean[dim]) / self.scale[dim];
        }
        FeatureVector::new(out)
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }
}
