use super::signal::Signal;

/// Noise magnitude per frequency bin over time.
pub type FreqNoise = Signal<Vec<f64>>;

impl Signal<Vec<f64>> {
    /// Mean magnitude across bins at each timestamp. Samples without bins average to 0.
    pub fn average(&self) -> Signal<f64> {
        self.map(|bins| {
            if bins.is_empty() {
                0.0
            } else {
                bins.iter().sum::<f64>() / bins.len() as f64
            }
        })
    }

    pub fn bin_count(&self) -> usize {
        self.values().iter().map(|b| b.len()).max().unwrap_or(0)
    }
}
