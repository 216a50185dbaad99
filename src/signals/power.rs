use super::signal::Signal;
use crate::error::{Result, WattsplitError};
use num_complex::Complex64;

/// Complex power per measured harmonic at one instant.
pub type Harmonics = Vec<Complex64>;

/// Complex per-harmonic power over time.
pub type PowerSignal = Signal<Harmonics>;

impl Signal<Harmonics> {
    /// Net complex power: the harmonic components summed per timestamp.
    pub fn net(&self) -> Signal<Complex64> {
        self.map(|harmonics| harmonics.iter().sum())
    }

    /// Real (active) power in watts.
    pub fn real(&self) -> Signal<f64> {
        self.map(|harmonics| harmonics.iter().map(|c| c.re).sum())
    }

    /// Reactive power in VAr.
    pub fn reactive(&self) -> Signal<f64> {
        self.map(|harmonics| harmonics.iter().map(|c| c.im).sum())
    }

    /// Apparent power magnitude in VA.
    pub fn apparent(&self) -> Signal<f64> {
        self.map(|harmonics| harmonics.iter().sum::<Complex64>().norm())
    }

    /// `cos(angle)` of one harmonic component; index 0 is the fundamental.
    pub fn power_factor(&self, harmonic: usize) -> Result<Signal<f64>> {
        if let Some(sample) = self.values().iter().find(|h| h.len() <= harmonic) {
            return Err(WattsplitError::HarmonicOutOfRange {
                index: harmonic,
                available: sample.len(),
            });
        }

        Ok(self.map(|harmonics| harmonics[harmonic].arg().cos()))
    }

    /// Smallest number of harmonic components carried by any sample.
    pub fn harmonic_count(&self) -> usize {
        self.values().iter().map(|h| h.len()).min().unwrap_or(0)
    }
}
