#![allow(dead_code)]

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wattsplit::signals::{FreqNoise, MeterReading, PowerSignal, Signal};
use wattsplit::types::Tag;

/// 2012-10-22 07:00:01 UTC
pub const BASE_TIME: f64 = 1_350_889_201.0;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A rectangular load: `real` W and `reactive` VAr over `[on, off)` seconds.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    pub on: f64,
    pub off: f64,
    pub real: f64,
    pub reactive: f64,
}

impl Pulse {
    pub fn new(on: f64, off: f64, real: f64) -> Self {
        Self { on, off, real, reactive: 0.0 }
    }

    pub fn with_reactive(mut self, reactive: f64) -> Self {
        self.reactive = reactive;
        self
    }

    fn at(&self, t: f64) -> Complex64 {
        if t >= self.on && t < self.off {
            Complex64::new(self.real, self.reactive)
        } else {
            Complex64::new(0.0, 0.0)
        }
    }
}

/// Timestamps `start, start + 1, ..., start + seconds`.
pub fn timeline(start: f64, seconds: usize) -> Vec<f64> {
    (0..=seconds).map(|i| start + i as f64).collect()
}

/// Single-harmonic power trace: a constant base load plus pulses.
pub fn power_trace(timestamps: &[f64], base: f64, pulses: &[Pulse]) -> PowerSignal {
    let values = timestamps
        .iter()
        .map(|&t| {
            let total = pulses
                .iter()
                .fold(Complex64::new(base, 0.0), |acc, p| acc + p.at(t));
            vec![total]
        })
        .collect();
    Signal::new(values, timestamps.to_vec()).unwrap()
}

/// Like [`power_trace`] with uniform noise of `amplitude` W on the real part.
pub fn noisy_power_trace(
    timestamps: &[f64],
    base: f64,
    pulses: &[Pulse],
    amplitude: f64,
    seed: u64,
) -> PowerSignal {
    let mut rng = StdRng::seed_from_u64(seed);
    let clean = power_trace(timestamps, base, pulses);
    let values = clean
        .values()
        .iter()
        .map(|h| {
            let jitter = rng.gen_range(-amplitude..=amplitude);
            vec![h[0] + Complex64::new(jitter, 0.0)]
        })
        .collect();
    Signal::new(values, timestamps.to_vec()).unwrap()
}

/// Four-bin HF noise at magnitude 1, with `burst` magnitude around the given times.
pub fn noise_trace(timestamps: &[f64], bursts_at: &[f64], burst: f64) -> FreqNoise {
    let values = timestamps
        .iter()
        .map(|&t| {
            let level = if bursts_at.iter().any(|&b| (t - b).abs() < 0.5) {
                burst
            } else {
                1.0
            };
            vec![level; 4]
        })
        .collect();
    Signal::new(values, timestamps.to_vec()).unwrap()
}

pub fn tag(id: i64, label: &str, on: f64, off: f64) -> Tag {
    Tag::new(id, label, on, off).unwrap()
}

/// Reading with the given phases and a quiet HF channel.
pub fn reading(l1: PowerSignal, l2: PowerSignal, tags: Option<Vec<Tag>>) -> MeterReading {
    let hf = noise_trace(l1.timestamps(), &[], 1.0);
    MeterReading::new(l1, l2, hf, tags).unwrap()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {}, got {}",
        expected,
        tolerance,
        actual
    );
}
