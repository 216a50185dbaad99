use crate::error::Result;
use crate::ml::models::Classification;
use crate::signals::to_datetime;
use crate::types::{Cycle, Phase, OTHER_LABEL};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// A detected cycle and the appliance it was assigned to.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedCycle {
    pub phase: Phase,
    pub cycle: Cycle,
    pub classification: Classification,
}

/// Per-appliance decomposition of a reading's total real power.
///
/// `residual` is clamped at zero. Clamped overshoot is counted in
/// `negative_residual_samples` / `clamped_overshoot_watts` and is not taken
/// back out of the appliance series, so `sum(appliances) + residual` exceeds
/// the total by exactly the clamped amount at those samples.
#[derive(Debug, Clone, Serialize)]
pub struct DisaggregationResult {
    pub timestamps: Vec<f64>,
    pub per_appliance: BTreeMap<String, Vec<f64>>,
    pub residual: Vec<f64>,
    pub cycles: Vec<ClassifiedCycle>,
    pub negative_residual_samples: usize,
    pub clamped_overshoot_watts: f64,
}

impl DisaggregationResult {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.per_appliance.keys().map(|k| k.as_str())
    }

    pub fn series(&self, label: &str) -> Option<&[f64]> {
        if label == OTHER_LABEL {
            return Some(&self.residual);
        }
        self.per_appliance.get(label).map(|s| s.as_slice())
    }

    /// `Other` first, then appliances in label order.
    pub fn labeled_series(&self) -> Vec<(&str, &[f64])> {
        std::iter::once((OTHER_LABEL, self.residual.as_slice()))
            .chain(
                self.per_appliance
                    .iter()
                    .map(|(label, series)| (label.as_str(), series.as_slice())),
            )
            .collect()
    }

    /// Sum of all appliance series per timestamp.
    pub fn attributed(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.timestamps.len()];
        for series in self.per_appliance.values() {
            for (acc, v) in total.iter_mut().zip(series) {
                *acc += v;
            }
        }
        total
    }

    pub fn format_times(&self) -> Vec<DateTime<Utc>> {
        self.timestamps.iter().map(|&t| to_datetime(t)).collect()
    }

    /// Columns `timestamp`, `Other`, then one column per appliance label.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.per_appliance.len() + 2);
        columns.push(Column::new("timestamp".into(), self.timestamps.as_slice()));
        for (label, series) in self.labeled_series() {
            columns.push(Column::new(label.into(), series));
        }

        Ok(DataFrame::new(columns)?)
    }
}
