use crate::error::Result;
use crate::signals::{FreqNoise, MeterReading, PowerSignal};
use crate::types::{Cycle, Phase};

pub trait CycleDetector: Send + Sync {
    fn name(&self) -> &str;

    /// Detect activity cycles on one phase, sorted by ON time and non-overlapping.
    /// `noise` is an optional corroborating channel.
    fn detect(&self, power: &PowerSignal, noise: Option<&FreqNoise>) -> Result<Vec<Cycle>>;

    /// Run [`CycleDetector::detect`] on both phases of a reading, using its HF channel.
    fn detect_phases(&self, reading: &MeterReading) -> Result<Vec<(Phase, Vec<Cycle>)>> {
        reading
            .phases()
            .into_iter()
            .map(|(phase, power)| Ok((phase, self.detect(power, Some(reading.hf()))?)))
            .collect()
    }
}

/// Sort cycles and merge any that overlap or sit closer than `gap` seconds.
pub fn merge_cycles(mut cycles: Vec<Cycle>, gap: f64) -> Vec<Cycle> {
    cycles.sort_by(|a, b| a.on_time.total_cmp(&b.on_time));

    let mut merged: Vec<Cycle> = Vec::with_capacity(cycles.len());
    for cycle in cycles {
        match merged.last_mut() {
            Some(last) if cycle.on_time <= last.off_time + gap => {
                last.off_time = last.off_time.max(cycle.off_time);
            }
            _ => merged.push(cycle),
        }
    }

    merged
}
