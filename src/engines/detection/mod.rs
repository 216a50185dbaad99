pub mod base;
pub mod baseline;
pub mod threshold;

pub use base::{merge_cycles, CycleDetector};
pub use baseline::RollingBaseline;
pub use threshold::ThresholdCycleDetector;
