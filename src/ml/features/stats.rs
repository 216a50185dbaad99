//! Sample statistics used by the cycle features.
//!
//! Degenerate inputs never produce NaN: the moments fall back to 0.0 when the
//! sample is too small (skew needs 3 samples, kurtosis 4) or has no spread.

use crate::signals::to_datetime;
use chrono::Timelike;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    central_moment(values, mean(values), 2).sqrt()
}

/// Adjusted Fisher-Pearson skewness.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return 0.0;
    }

    let m = mean(values);
    let m2 = central_moment(values, m, 2);
    if is_flat(m2, m) {
        return 0.0;
    }

    let m3 = central_moment(values, m, 3);
    let g1 = m3 / m2.powf(1.5);
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Bias-corrected excess (Fisher) kurtosis.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return 0.0;
    }

    let m = mean(values);
    let m2 = central_moment(values, m, 2);
    if is_flat(m2, m) {
        return 0.0;
    }

    let m4 = central_moment(values, m, 4);
    let g2 = m4 / (m2 * m2) - 3.0;
    ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// `[std, mean, kurtosis, skew]` of one series.
pub fn basic_stats(values: &[f64]) -> [f64; 4] {
    [std_dev(values), mean(values), kurtosis(values), skewness(values)]
}

/// Position of the series maximum along the elapsed time, in `[0, 1]`.
/// The first maximum wins; a zero-length window gives 0.
pub fn peak_time_fraction(values: &[f64], timestamps: &[f64]) -> f64 {
    let Some(peak) = argmax(values) else {
        return 0.0;
    };
    let (Some(&first), Some(&last)) = (timestamps.first(), timestamps.last()) else {
        return 0.0;
    };

    let duration = last - first;
    if duration <= 0.0 {
        return 0.0;
    }
    ((timestamps[peak] - first) / duration).clamp(0.0, 1.0)
}

/// UTC time of day of `t` mapped onto `[-1, 1]` (midnight = -1).
pub fn day_time_fraction(t: f64) -> f64 {
    let time = to_datetime(t);
    let fraction = time.hour() as f64 / 24.0
        + time.minute() as f64 / 1440.0
        + time.second() as f64 / 86400.0;
    2.0 * fraction - 1.0
}

fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if b >= v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

fn central_moment(values: &[f64], mean: f64, order: i32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| (v - mean).powi(order)).sum::<f64>() / values.len() as f64
}

// Spread below rounding noise relative to the level counts as flat.
fn is_flat(m2: f64, mean: f64) -> bool {
    m2.sqrt() <= 1e-12 * mean.abs().max(1.0)
}
