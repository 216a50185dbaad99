pub mod engine;
pub mod result;

pub use engine::DisaggregationEngine;
pub use result::{ClassifiedCycle, DisaggregationResult};
