use super::{FreqNoise, PowerSignal};
use crate::error::{Result, WattsplitError};
use crate::types::{Phase, Tag};

/// One captured meter trace: both phases, the HF noise channel and optional tags.
///
/// Both phases share one timestamp axis. Use [`MeterReading::aligned`] when the
/// phases were sampled independently.
#[derive(Debug, Clone)]
pub struct MeterReading {
    l1: PowerSignal,
    l2: PowerSignal,
    hf: FreqNoise,
    tags: Option<Vec<Tag>>,
}

impl MeterReading {
    pub fn new(
        l1: PowerSignal,
        l2: PowerSignal,
        hf: FreqNoise,
        tags: Option<Vec<Tag>>,
    ) -> Result<Self> {
        if l1.timestamps() != l2.timestamps() {
            return Err(WattsplitError::MisalignedPhases(format!(
                "L1 has {} samples, L2 has {} samples on a different time axis",
                l1.len(),
                l2.len()
            )));
        }

        Ok(Self { l1, l2, hf, tags })
    }

    /// Resample the phase with fewer samples onto the other phase's timestamps,
    /// then build the reading.
    pub fn aligned(
        l1: PowerSignal,
        l2: PowerSignal,
        hf: FreqNoise,
        tags: Option<Vec<Tag>>,
    ) -> Result<Self> {
        let (l1, l2) = if l1.timestamps() == l2.timestamps() {
            (l1, l2)
        } else if l1.len() < l2.len() {
            (l1.align_to(l2.timestamps())?, l2)
        } else {
            let l2 = l2.align_to(l1.timestamps())?;
            (l1, l2)
        };

        Self::new(l1, l2, hf, tags)
    }

    pub fn l1(&self) -> &PowerSignal {
        &self.l1
    }

    pub fn l2(&self) -> &PowerSignal {
        &self.l2
    }

    pub fn hf(&self) -> &FreqNoise {
        &self.hf
    }

    pub fn tags(&self) -> Option<&[Tag]> {
        self.tags.as_deref()
    }

    pub fn phase(&self, phase: Phase) -> &PowerSignal {
        match phase {
            Phase::L1 => &self.l1,
            Phase::L2 => &self.l2,
        }
    }

    pub fn phases(&self) -> [(Phase, &PowerSignal); 2] {
        [(Phase::L1, &self.l1), (Phase::L2, &self.l2)]
    }

    /// Shared time axis of both phases.
    pub fn timestamps(&self) -> &[f64] {
        self.l1.timestamps()
    }

    pub fn total_power(&self) -> Result<PowerSignal> {
        &self.l1 + &self.l2
    }

    /// Total real power in watts across both phases.
    pub fn total_real_power(&self) -> Result<Vec<f64>> {
        Ok(self.total_power()?.real().values().to_vec())
    }

    /// All four channels cut to the same window. Only tags overlapping the
    /// window (bounds inclusive) are kept.
    pub fn truncate(&self, on: Option<f64>, off: Option<f64>) -> Result<Self> {
        let tags = self.tags.as_ref().map(|tags| {
            tags.iter()
                .filter(|tag| {
                    on.map_or(true, |on| tag.off_time >= on)
                        && off.map_or(true, |off| tag.on_time <= off)
                })
                .cloned()
                .collect()
        });

        Ok(Self {
            l1: self.l1.truncate(on, off)?,
            l2: self.l2.truncate(on, off)?,
            hf: self.hf.truncate(on, off)?,
            tags,
        })
    }

    /// The reading cut to the span covered by its tags, or `None` without tags.
    pub fn tagged(&self) -> Result<Option<Self>> {
        let Some(tags) = self.tags.as_ref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let start = tags.iter().map(|t| t.on_time).fold(f64::INFINITY, f64::min);
        let stop = tags.iter().map(|t| t.off_time).fold(f64::NEG_INFINITY, f64::max);
        self.truncate(Some(start), Some(stop)).map(Some)
    }
}
