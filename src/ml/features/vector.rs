use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 16;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "real_std",
    "real_mean",
    "real_kurtosis",
    "real_skew",
    "reactive_std",
    "reactive_mean",
    "reactive_kurtosis",
    "reactive_skew",
    "pf_std",
    "pf_mean",
    "pf_kurtosis",
    "pf_skew",
    "duration",
    "day_time_fraction",
    "peak_time_fraction_reactive",
    "peak_time_fraction_real",
];

/// Fixed-length statistical description of one power cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.0[i])
    }

    pub fn norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn euclidean_distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Element-wise mean, `None` for an empty slice.
    pub fn mean_of(vectors: &[FeatureVector]) -> Option<FeatureVector> {
        if vectors.is_empty() {
            return None;
        }

        let mut sum = [0.0; FEATURE_COUNT];
        for v in vectors {
            for (acc, x) in sum.iter_mut().zip(v.0.iter()) {
                *acc += x;
            }
        }

        let n = vectors.len() as f64;
        Some(Self(sum.map(|s| s / n)))
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}
