use crate::config::{AppConfig, ClassificationConfig};
use crate::engines::detection::{CycleDetector, ThresholdCycleDetector};
use crate::engines::matching::TagMatcher;
use crate::error::Result;
use crate::ml::features::FeatureExtractor;
use crate::ml::models::{ApplianceClassifier, ApplianceProfile};
use crate::signals::MeterReading;
use crate::types::ApplianceId;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Counts from one or more training passes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrainingStats {
    pub tags_seen: usize,
    pub exemplars_added: usize,
    pub tags_skipped: usize,
}

impl AddAssign for TrainingStats {
    fn add_assign(&mut self, other: Self) {
        self.tags_seen += other.tags_seen;
        self.exemplars_added += other.exemplars_added;
        self.tags_skipped += other.tags_skipped;
    }
}

/// Builds appliance profiles from tagged meter readings.
///
/// For every tag the detected cycle (on either phase) that best overlaps the
/// widened tag window becomes one exemplar of that appliance's profile.
pub struct ApplianceTrainer<D: CycleDetector = ThresholdCycleDetector> {
    detector: D,
    matcher: TagMatcher,
    extractor: FeatureExtractor,
    profiles: BTreeMap<ApplianceId, ApplianceProfile>,
}

impl ApplianceTrainer<ThresholdCycleDetector> {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            ThresholdCycleDetector::new(config.detection.clone()),
            TagMatcher::new(config.matching.clone()),
            FeatureExtractor::new(config.features.clone()),
        ))
    }
}

impl<D: CycleDetector> ApplianceTrainer<D> {
    pub fn new(detector: D, matcher: TagMatcher, extractor: FeatureExtractor) -> Self {
        Self {
            detector,
            matcher,
            extractor,
            profiles: BTreeMap::new(),
        }
    }

    /// Add one exemplar per matched tag of `reading`. Readings without tags are a no-op.
    pub fn add_reading(&mut self, reading: &MeterReading) -> Result<TrainingStats> {
        let mut stats = TrainingStats::default();

        let Some(tags) = reading.tags().filter(|t| !t.is_empty()) else {
            log::info!("Reading has no tags, nothing to train on");
            return Ok(stats);
        };

        let detected = self.detector.detect_phases(reading)?;

        for tag in tags {
            stats.tags_seen += 1;

            let Some(found) = self.matcher.best_match(&detected, tag) else {
                log::warn!(
                    "No detected cycle overlaps tag '{}' ({:.1}s..{:.1}s), skipping",
                    tag.label,
                    tag.on_time,
                    tag.off_time
                );
                stats.tags_skipped += 1;
                continue;
            };

            let power = reading.phase(found.phase).truncate_cycle(&found.cycle)?;
            let features = self.extractor.extract(&power)?;

            let profile = self
                .profiles
                .entry(tag.appliance_id)
                .or_insert_with(|| ApplianceProfile::new(tag.appliance_id, tag.label.clone()));
            if profile.label() != tag.label {
                log::debug!(
                    "Appliance {} tagged as '{}', keeping label '{}'",
                    tag.appliance_id,
                    tag.label,
                    profile.label()
                );
            }
            profile.add_exemplar(features);
            stats.exemplars_added += 1;

            log::debug!(
                "Tag '{}' matched {} cycle {:.1}s..{:.1}s (score {:.2})",
                tag.label,
                found.phase.as_str(),
                found.cycle.on_time,
                found.cycle.off_time,
                found.score
            );
        }

        log::info!(
            "Training pass: {} tags, {} exemplars, {} skipped",
            stats.tags_seen,
            stats.exemplars_added,
            stats.tags_skipped
        );
        Ok(stats)
    }

    pub fn add_readings<'a, I>(&mut self, readings: I) -> Result<TrainingStats>
    where
        I: IntoIterator<Item = &'a MeterReading>,
    {
        let mut total = TrainingStats::default();
        for reading in readings {
            total += self.add_reading(reading)?;
        }
        Ok(total)
    }

    pub fn profile(&self, id: ApplianceId) -> Option<&ApplianceProfile> {
        self.profiles.get(&id)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &ApplianceProfile> {
        self.profiles.values()
    }

    pub fn into_profiles(self) -> Vec<ApplianceProfile> {
        self.profiles.into_values().collect()
    }

    /// Fit a classifier on the current profiles. The scaler is fit here, once.
    pub fn build_classifier(&self, config: ClassificationConfig) -> Result<ApplianceClassifier> {
        let profiles: Vec<ApplianceProfile> = self.profiles.values().cloned().collect();
        ApplianceClassifier::fit(&profiles, self.extractor.clone(), config)
    }
}
