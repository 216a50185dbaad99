use super::result::{ClassifiedCycle, DisaggregationResult};
use crate::config::AppConfig;
use crate::engines::detection::{CycleDetector, ThresholdCycleDetector};
use crate::error::Result;
use crate::ml::models::ApplianceClassifier;
use crate::signals::MeterReading;
use crate::types::{Cycle, Phase};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Detects and classifies cycles on both phases and rebuilds per-appliance power.
pub struct DisaggregationEngine<D: CycleDetector = ThresholdCycleDetector> {
    detector: D,
    classifier: ApplianceClassifier,
}

impl DisaggregationEngine<ThresholdCycleDetector> {
    pub fn from_config(config: &AppConfig, classifier: ApplianceClassifier) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            ThresholdCycleDetector::new(config.detection.clone()),
            classifier,
        ))
    }
}

impl<D: CycleDetector> DisaggregationEngine<D> {
    pub fn new(detector: D, classifier: ApplianceClassifier) -> Self {
        Self {
            detector,
            classifier,
        }
    }

    pub fn classifier(&self) -> &ApplianceClassifier {
        &self.classifier
    }

    /// Decompose the reading. Returns `Ok(None)` when no cycle is detected on either phase.
    pub fn disaggregate(&self, reading: &MeterReading) -> Result<Option<DisaggregationResult>> {
        let detected = self.detector.detect_phases(reading)?;

        let jobs: Vec<(Phase, Cycle)> = detected
            .iter()
            .flat_map(|(phase, cycles)| cycles.iter().map(move |c| (*phase, *c)))
            .collect();

        for (phase, cycles) in &detected {
            log::info!("{}: {} cycles detected", phase.as_str(), cycles.len());
        }
        if jobs.is_empty() {
            log::info!("No cycles detected, nothing to disaggregate");
            return Ok(None);
        }

        // Cycles are independent; order is restored by collect.
        let cycles = jobs
            .par_iter()
            .map(|&(phase, cycle)| {
                let power = reading.phase(phase).truncate_cycle(&cycle)?;
                let classification = self.classifier.classify(&power)?;
                Ok(ClassifiedCycle {
                    phase,
                    cycle,
                    classification,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let timestamps = reading.timestamps().to_vec();
        let per_appliance = self.reconstruct(reading, &cycles)?;

        let total = reading.total_real_power()?;
        let mut residual = total;
        for series in per_appliance.values() {
            for (r, v) in residual.iter_mut().zip(series) {
                *r -= v;
            }
        }

        let mut negative_residual_samples = 0;
        let mut clamped_overshoot_watts = 0.0;
        for r in residual.iter_mut() {
            if *r < 0.0 {
                negative_residual_samples += 1;
                clamped_overshoot_watts += -*r;
                *r = 0.0;
            }
        }
        if negative_residual_samples > 0 {
            log::warn!(
                "Clamped {} negative residual samples ({:.1} W total overshoot)",
                negative_residual_samples,
                clamped_overshoot_watts
            );
        }

        log::info!(
            "{} cycles -> {} appliance series",
            cycles.len(),
            per_appliance.len()
        );

        Ok(Some(DisaggregationResult {
            timestamps,
            per_appliance,
            residual,
            cycles,
            negative_residual_samples,
            clamped_overshoot_watts,
        }))
    }

    /// Real power of every recognised cycle placed on the reading's time axis,
    /// summed per label.
    fn reconstruct(
        &self,
        reading: &MeterReading,
        cycles: &[ClassifiedCycle],
    ) -> Result<BTreeMap<String, Vec<f64>>> {
        let length = reading.timestamps().len();
        let l1_real = reading.l1().real();
        let l2_real = reading.l2().real();

        let mut per_appliance: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for classified in cycles.iter().filter(|c| !c.classification.is_unknown()) {
            let power = reading.phase(classified.phase);
            let Some((start, stop)) = power.index_range(
                Some(classified.cycle.on_time),
                Some(classified.cycle.off_time),
            )?
            else {
                continue;
            };

            let phase_real = match classified.phase {
                Phase::L1 => l1_real.values(),
                Phase::L2 => l2_real.values(),
            };

            let series = per_appliance
                .entry(classified.classification.label.clone())
                .or_insert_with(|| vec![0.0; length]);
            for (slot, watts) in series[start..=stop].iter_mut().zip(&phase_real[start..=stop]) {
                *slot += watts;
            }
        }

        Ok(per_appliance)
    }
}
