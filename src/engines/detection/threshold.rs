use super::base::{merge_cycles, CycleDetector};
use super::baseline::RollingBaseline;
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::signals::{FreqNoise, PowerSignal, Signal};
use crate::types::Cycle;

/// Baseline + threshold-crossing detector over real power.
///
/// A cycle starts when real power exceeds the rolling idle baseline by the rise
/// threshold and ends at the first sample that falls back under the release
/// level (`baseline + rise * (1 - hysteresis_ratio)`). The baseline is frozen
/// while a cycle is active and only learns from idle samples.
///
/// A load already drawing when the trace starts is seeded into the baseline.
/// Until the first rising edge, a drop below the baseline by more than the
/// rise threshold closes a cycle that runs from the first sample, and the
/// baseline restarts from the drop.
pub struct ThresholdCycleDetector {
    config: DetectionConfig,
}

#[derive(Clone, Copy)]
struct ActiveCycle {
    on_time: f64,
    release_level: f64,
}

impl ThresholdCycleDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    fn rise_threshold(&self, baseline: f64) -> f64 {
        (self.config.rise_threshold_ratio * baseline.abs()).max(self.config.min_rise_watts)
    }

    fn raw_cycles(&self, real: &Signal<f64>) -> Vec<Cycle> {
        let mut baseline = RollingBaseline::new(
            self.config.baseline_window,
            self.config.baseline_percentile,
        );
        let mut active: Option<ActiveCycle> = None;
        let mut cycles = Vec::new();
        let Some((first, _)) = real.range() else {
            return cycles;
        };
        // No edge seen yet, so the baseline may hold a load that was already on
        let mut leading = true;

        for (&t, &watts) in real.timestamps().iter().zip(real.values()) {
            match active {
                None => {
                    let Some(base) = baseline.current() else {
                        baseline.add_sample(watts);
                        continue;
                    };

                    let rise = self.rise_threshold(base);
                    if leading && base - watts > rise {
                        log::debug!(
                            "Load on since trace start dropped at {:.1}s: {:.1} W under {:.1} W",
                            t,
                            watts,
                            base
                        );
                        if t > first {
                            cycles.push(Cycle {
                                on_time: first,
                                off_time: t,
                            });
                        }
                        leading = false;
                        baseline = RollingBaseline::new(
                            self.config.baseline_window,
                            self.config.baseline_percentile,
                        );
                        baseline.add_sample(watts);
                    } else if watts - base > rise {
                        log::debug!(
                            "Rising edge at {:.1}s: {:.1} W over baseline {:.1} W",
                            t,
                            watts,
                            base
                        );
                        leading = false;
                        active = Some(ActiveCycle {
                            on_time: t,
                            release_level: base + rise * (1.0 - self.config.hysteresis_ratio),
                        });
                    } else {
                        baseline.add_sample(watts);
                    }
                }
                Some(cycle) => {
                    if watts <= cycle.release_level {
                        log::debug!("Falling edge at {:.1}s: {:.1} W", t, watts);
                        if t > cycle.on_time {
                            cycles.push(Cycle {
                                on_time: cycle.on_time,
                                off_time: t,
                            });
                        }
                        active = None;
                        baseline.add_sample(watts);
                    }
                }
            }
        }

        // Still running when the trace ends
        if let (Some(cycle), Some((_, last))) = (active, real.range()) {
            if last > cycle.on_time {
                cycles.push(Cycle {
                    on_time: cycle.on_time,
                    off_time: last,
                });
            }
        }

        cycles
    }

    /// Keep cycles whose ON edge has an HF noise burst within the search window.
    /// Cycles open since `trace_start` have no observed ON edge and are kept.
    fn corroborate(&self, cycles: Vec<Cycle>, noise: &FreqNoise, trace_start: f64) -> Vec<Cycle> {
        let averages = noise.average();
        let mut sorted = averages.values().to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = sorted[sorted.len() / 2];
        let burst_level = self.config.noise_burst_ratio * median;
        let window = self.config.noise_search_window_secs;

        cycles
            .into_iter()
            .filter(|cycle| {
                if cycle.on_time <= trace_start {
                    return true;
                }
                let corroborated = averages
                    .timestamps()
                    .iter()
                    .zip(averages.values())
                    .any(|(&t, &avg)| (t - cycle.on_time).abs() <= window && avg > burst_level);
                if !corroborated {
                    log::debug!("Dropping cycle at {:.1}s: no HF noise burst", cycle.on_time);
                }
                corroborated
            })
            .collect()
    }
}

impl CycleDetector for ThresholdCycleDetector {
    fn name(&self) -> &str {
        "threshold"
    }

    fn detect(&self, power: &PowerSignal, noise: Option<&FreqNoise>) -> Result<Vec<Cycle>> {
        if power.is_empty() {
            return Ok(Vec::new());
        }

        let real = power.real();
        let mut cycles = self.raw_cycles(&real);
        let raw_count = cycles.len();

        if self.config.require_noise_corroboration {
            match (noise.filter(|n| !n.is_empty()), real.range()) {
                (Some(noise), Some((first, _))) => cycles = self.corroborate(cycles, noise, first),
                _ => log::warn!("Noise corroboration requested but no HF samples available"),
            }
        }

        let cycles: Vec<Cycle> = merge_cycles(cycles, self.config.merge_gap_secs)
            .into_iter()
            .filter(|c| c.duration() >= self.config.min_cycle_duration_secs)
            .collect();

        log::debug!("{} raw edges -> {} cycles", raw_count, cycles.len());
        Ok(cycles)
    }
}
