//! Rolling idle-power baseline.

use std::collections::VecDeque;

/// Sliding window of idle power readings. The baseline is a low percentile of
/// the window, which ignores short dips while following the true idle level.
#[derive(Debug, Clone)]
pub struct RollingBaseline {
    samples: VecDeque<f64>,
    max_samples: usize,
    percentile: f64,
}

impl RollingBaseline {
    pub fn new(max_samples: usize, percentile: f64) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            percentile: percentile.clamp(0.0, 1.0),
        }
    }

    pub fn add_sample(&mut self, watts: f64) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(watts);
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Current baseline, `None` until the first sample arrives.
    pub fn current(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }

        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let idx = ((sorted.len() - 1) as f64 * self.percentile).round() as usize;
        Some(sorted[idx.min(sorted.len() - 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_drops_oldest_samples() {
        let mut baseline = RollingBaseline::new(3, 0.0);
        for w in [5.0, 1.0, 7.0, 8.0] {
            baseline.add_sample(w);
        }
        assert_eq!(baseline.sample_count(), 3);
        assert_eq!(baseline.current(), Some(1.0));

        baseline.add_sample(9.0);
        assert_eq!(baseline.current(), Some(7.0));
    }

    #[test]
    fn empty_window_has_no_baseline() {
        assert_eq!(RollingBaseline::new(10, 0.05).current(), None);
    }
}
