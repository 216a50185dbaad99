//! Appliance-level disaggregation of two-phase smart meter telemetry.
//!
//! A [`signals::MeterReading`] is segmented into ON/OFF cycles per phase,
//! each cycle is assigned to a known appliance from its statistical features,
//! and total real power is rebuilt as per-appliance series plus an `Other`
//! residual.
//!
//! Training: [`ml::training::ApplianceTrainer`] matches tags to detected cycles
//! and builds [`ml::models::ApplianceProfile`]s, then fits an
//! [`ml::models::ApplianceClassifier`]. Inference:
//! [`engines::disaggregation::DisaggregationEngine`].

pub mod config;
pub mod engines;
pub mod error;
pub mod ml;
pub mod signals;
pub mod types;

pub use error::{Result, WattsplitError};
