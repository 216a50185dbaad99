use crate::error::{Result, WattsplitError};
use crate::types::Cycle;
use chrono::{DateTime, Utc};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Values that can be added sample-by-sample when two signals are combined.
pub trait Summable: Clone {
    fn sum_with(&self, other: &Self) -> Result<Self>;
}

impl Summable for f64 {
    fn sum_with(&self, other: &Self) -> Result<Self> {
        Ok(self + other)
    }
}

impl Summable for Complex64 {
    fn sum_with(&self, other: &Self) -> Result<Self> {
        Ok(self + other)
    }
}

impl<T: Summable> Summable for Vec<T> {
    fn sum_with(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(WattsplitError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        self.iter().zip(other).map(|(a, b)| a.sum_with(b)).collect()
    }
}

/// Ordered values with one epoch timestamp (seconds) per value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal<V> {
    values: Vec<V>,
    timestamps: Vec<f64>,
}

impl<V: Clone> Signal<V> {
    /// Build a signal, rejecting unequal lengths and unsorted or non-finite timestamps.
    pub fn new(values: Vec<V>, timestamps: Vec<f64>) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(WattsplitError::LengthMismatch {
                left: values.len(),
                right: timestamps.len(),
            });
        }

        if let Some(i) = timestamps.iter().position(|t| !t.is_finite()) {
            return Err(WattsplitError::InvalidSignal(format!(
                "Non-finite timestamp at index {}",
                i
            )));
        }

        if let Some(i) = timestamps.windows(2).position(|w| w[1] < w[0]) {
            return Err(WattsplitError::InvalidSignal(format!(
                "Timestamps decrease at index {}: {} -> {}",
                i + 1,
                timestamps[i],
                timestamps[i + 1]
            )));
        }

        Ok(Self { values, timestamps })
    }

    pub fn empty() -> Self {
        Self {
            values: Vec::new(),
            timestamps: Vec::new(),
        }
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Elapsed seconds between the first and last sample.
    pub fn duration(&self) -> f64 {
        match self.range() {
            Some((first, last)) => last - first,
            None => 0.0,
        }
    }

    /// First and last timestamp.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    /// Index of the sample closest in time to `time`; ties go to the earlier sample.
    pub fn time_index(&self, time: f64) -> Option<usize> {
        let ts = &self.timestamps;
        if ts.is_empty() {
            return None;
        }

        let upper = ts.partition_point(|&t| t < time);
        if upper == 0 {
            return Some(0);
        }
        if upper == ts.len() {
            return Some(ts.len() - 1);
        }

        let mut lower = upper - 1;
        if time - ts[lower] > ts[upper] - time {
            return Some(upper);
        }
        while lower > 0 && ts[lower - 1] == ts[lower] {
            lower -= 1;
        }
        Some(lower)
    }

    /// Inclusive index range covering `[on, off]`, snapped to the nearest samples.
    pub fn index_range(&self, on: Option<f64>, off: Option<f64>) -> Result<Option<(usize, usize)>> {
        if let (Some(on), Some(off)) = (on, off) {
            if on > off {
                return Err(WattsplitError::InvalidInterval { on, off });
            }
        }
        if self.is_empty() {
            return Ok(None);
        }

        let last = self.len() - 1;
        let start = on.and_then(|t| self.time_index(t)).unwrap_or(0);
        let stop = off.and_then(|t| self.time_index(t)).unwrap_or(last);
        Ok(Some((start, stop)))
    }

    /// Sub-signal covering `[on, off]`. `None` bounds mean "from start" / "to end";
    /// windows reaching past the data clamp to the available samples.
    pub fn truncate(&self, on: Option<f64>, off: Option<f64>) -> Result<Self> {
        match self.index_range(on, off)? {
            Some((start, stop)) => Ok(self.slice(start, stop)),
            None => Ok(Self::empty()),
        }
    }

    pub fn truncate_cycle(&self, cycle: &Cycle) -> Result<Self> {
        self.truncate(Some(cycle.on_time), Some(cycle.off_time))
    }

    /// Like [`Signal::truncate`], widened by `margin_ratio` of the snapped sample
    /// count on both sides.
    pub fn truncate_with_margin(
        &self,
        on: Option<f64>,
        off: Option<f64>,
        margin_ratio: f64,
    ) -> Result<Self> {
        if !(margin_ratio >= 0.0) {
            return Err(WattsplitError::InvalidSignal(format!(
                "Margin ratio must be non-negative, got {}",
                margin_ratio
            )));
        }

        let Some((start, stop)) = self.index_range(on, off)? else {
            return Ok(Self::empty());
        };

        let margin = ((stop - start) as f64 * margin_ratio) as usize;
        let start = start.saturating_sub(margin);
        let stop = (stop + margin).min(self.len() - 1);
        Ok(self.slice(start, stop))
    }

    fn slice(&self, start: usize, stop: usize) -> Self {
        Self {
            values: self.values[start..=stop].to_vec(),
            timestamps: self.timestamps[start..=stop].to_vec(),
        }
    }

    /// Source index picked for each target time by [`Signal::align_to`].
    pub fn alignment_indices(&self, target: &[f64]) -> Vec<usize> {
        let mut indices = Vec::with_capacity(target.len());
        if self.is_empty() {
            return indices;
        }

        let last = self.len() - 1;
        let mut cursor = 0;

        for &t in target {
            while cursor < last && self.timestamps[cursor] < t {
                cursor += 1;
            }
            indices.push(cursor);
        }

        indices
    }

    /// Resample onto `target`: each target time takes the first source sample
    /// at or after it, or the last sample once the source runs out.
    pub fn align_to(&self, target: &[f64]) -> Result<Self> {
        if self.is_empty() {
            return Err(WattsplitError::EmptySignal(
                "Cannot align an empty signal".to_string(),
            ));
        }

        let values = self
            .alignment_indices(target)
            .into_iter()
            .map(|i| self.values[i].clone())
            .collect();

        Self::new(values, target.to_vec())
    }

    /// Apply `f` to every value, keeping the timestamps.
    pub fn map<U, F>(&self, f: F) -> Signal<U>
    where
        F: Fn(&V) -> U,
    {
        Signal {
            values: self.values.iter().map(f).collect(),
            timestamps: self.timestamps.clone(),
        }
    }

    /// Timestamps as UTC datetimes, for renderers.
    pub fn format_times(&self) -> Vec<DateTime<Utc>> {
        self.timestamps.iter().map(|&t| to_datetime(t)).collect()
    }
}

impl<V: Summable> Signal<V> {
    /// Element-wise sum; keeps this signal's timestamps.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(WattsplitError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a.sum_with(b))
            .collect::<Result<Vec<V>>>()?;

        Ok(Self {
            values,
            timestamps: self.timestamps.clone(),
        })
    }
}

impl<'a, V: Summable> Add for &'a Signal<V> {
    type Output = Result<Signal<V>>;

    fn add(self, other: Self) -> Self::Output {
        self.try_add(other)
    }
}

pub(crate) fn to_datetime(t: f64) -> DateTime<Utc> {
    let secs = t.floor();
    let nanos = ((t - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(secs as i64, nanos).unwrap_or_default()
}
