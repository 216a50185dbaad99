use super::profile::ApplianceProfile;
use super::scaler::StandardScaler;
use crate::config::{ClassificationConfig, ConfigSection, SimilarityMetric};
use crate::error::Result;
use crate::ml::features::{FeatureExtractor, FeatureVector};
use crate::signals::PowerSignal;
use crate::types::{ApplianceId, UNKNOWN_APPLIANCE_ID, UNKNOWN_LABEL};
use serde::{Deserialize, Serialize};

/// Outcome of classifying one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub appliance_id: ApplianceId,
    pub label: String,
    /// Winning score under the configured metric, `None` when there was nothing to compare.
    pub score: Option<f64>,
    /// 0..1, higher means a closer match.
    pub confidence: f64,
}

impl Classification {
    fn unknown(score: Option<f64>, confidence: f64) -> Self {
        Self {
            appliance_id: UNKNOWN_APPLIANCE_ID,
            label: UNKNOWN_LABEL.to_string(),
            score,
            confidence,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.appliance_id == UNKNOWN_APPLIANCE_ID
    }
}

#[derive(Debug, Clone)]
struct KnownAppliance {
    id: ApplianceId,
    label: String,
    signature: FeatureVector, // standardized
}

/// Nearest-signature classifier over standardized feature vectors.
///
/// Read-only after [`ApplianceClassifier::fit`], so one instance can serve
/// concurrent classification calls.
#[derive(Debug, Clone)]
pub struct ApplianceClassifier {
    config: ClassificationConfig,
    extractor: FeatureExtractor,
    scaler: Option<StandardScaler>,
    appliances: Vec<KnownAppliance>,
}

impl ApplianceClassifier {
    /// Fit the scaler on every exemplar of every profile and standardize the
    /// signatures. Profiles without exemplars are ignored; with none left the
    /// classifier answers `Unknown` for everything.
    pub fn fit(
        profiles: &[ApplianceProfile],
        extractor: FeatureExtractor,
        config: ClassificationConfig,
    ) -> Result<Self> {
        config.validate()?;

        let trained: Vec<&ApplianceProfile> = profiles
            .iter()
            .filter(|p| p.signature().is_some())
            .collect();

        let corpus: Vec<FeatureVector> = trained
            .iter()
            .flat_map(|p| p.exemplars().iter().copied())
            .collect();

        if corpus.is_empty() {
            log::info!("No trained appliance profiles; every cycle will be Unknown");
            return Ok(Self {
                config,
                extractor,
                scaler: None,
                appliances: Vec::new(),
            });
        }

        if let [only] = trained.as_slice() {
            if corpus.windows(2).any(|pair| pair[0] != pair[1]) {
                log::warn!(
                    "Only appliance {} ({}) is trained and its {} exemplars differ; its \
                     signature standardizes to the origin and most cycles will be Unknown",
                    only.id(),
                    only.label(),
                    corpus.len()
                );
            }
        }

        let scaler = StandardScaler::fit(&corpus)?;
        let appliances = trained
            .iter()
            .filter_map(|p| {
                p.signature().map(|signature| KnownAppliance {
                    id: p.id(),
                    label: p.label().to_string(),
                    signature: scaler.transform(signature),
                })
            })
            .collect::<Vec<_>>();

        log::info!(
            "Classifier fitted on {} exemplars across {} appliances",
            corpus.len(),
            appliances.len()
        );

        Ok(Self {
            config,
            extractor,
            scaler: Some(scaler),
            appliances,
        })
    }

    pub fn appliance_count(&self) -> usize {
        self.appliances.len()
    }

    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Classify the power trace of one cycle.
    pub fn classify(&self, cycle: &PowerSignal) -> Result<Classification> {
        let features = self.extractor.extract(cycle)?;
        Ok(self.classify_features(&features))
    }

    /// Classify raw (unstandardized) cycle features.
    pub fn classify_features(&self, features: &FeatureVector) -> Classification {
        let Some(scaler) = &self.scaler else {
            return Classification::unknown(None, 0.0);
        };

        let query = scaler.transform(features);
        let metric = self.config.metric;

        let best = self
            .appliances
            .iter()
            .map(|appliance| (appliance, score(metric, &query, &appliance.signature)))
            .fold(None, |best: Option<(&KnownAppliance, f64)>, (appliance, s)| match best {
                Some((_, b)) if !is_better(metric, s, b) => best,
                _ => Some((appliance, s)),
            });

        let Some((appliance, best_score)) = best else {
            return Classification::unknown(None, 0.0);
        };

        let confidence = confidence(metric, best_score);
        if !accepts(metric, best_score, self.config.threshold) {
            log::debug!(
                "Best match {} scored {:.3}, rejected by threshold {:.3}",
                appliance.label,
                best_score,
                self.config.threshold
            );
            return Classification::unknown(Some(best_score), confidence);
        }

        Classification {
            appliance_id: appliance.id,
            label: appliance.label.clone(),
            score: Some(best_score),
            confidence,
        }
    }
}

/// `||a - b|| / (||a|| + ||b||)`; two zero vectors are identical (0).
pub fn normalized_euclidean(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let denominator = a.norm() + b.norm();
    if denominator > 0.0 {
        a.euclidean_distance(b) / denominator
    } else {
        0.0
    }
}

/// Cosine similarity; two zero vectors are identical (1), one zero vector scores 0.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let (na, nb) = (a.norm(), b.norm());
    match (na > 0.0, nb > 0.0) {
        (true, true) => (a.dot(b) / (na * nb)).clamp(-1.0, 1.0),
        (false, false) => 1.0,
        _ => 0.0,
    }
}

fn score(metric: SimilarityMetric, a: &FeatureVector, b: &FeatureVector) -> f64 {
    match metric {
        SimilarityMetric::NormalizedEuclidean => normalized_euclidean(a, b),
        SimilarityMetric::Cosine => cosine_similarity(a, b),
    }
}

fn is_better(metric: SimilarityMetric, candidate: f64, current: f64) -> bool {
    if metric.lower_is_better() {
        candidate < current
    } else {
        candidate > current
    }
}

fn accepts(metric: SimilarityMetric, score: f64, threshold: f64) -> bool {
    if metric.lower_is_better() {
        score < threshold
    } else {
        score > threshold
    }
}

fn confidence(metric: SimilarityMetric, score: f64) -> f64 {
    match metric {
        SimilarityMetric::NormalizedEuclidean => (1.0 - score).clamp(0.0, 1.0),
        SimilarityMetric::Cosine => score.clamp(0.0, 1.0),
    }
}
