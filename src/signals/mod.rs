//! Time-aligned signal containers.
//!
//! A [`Signal`] is two equal-length vectors: values and non-decreasing epoch
//! timestamps. Power and noise traces are `Signal`s with a concrete value type
//! and capability-specific methods, rather than a type hierarchy.

mod noise;
mod power;
mod reading;
mod signal;

pub use noise::FreqNoise;
pub use power::{Harmonics, PowerSignal};
pub use reading::MeterReading;
pub use signal::{Signal, Summable};
pub(crate) use signal::to_datetime;
