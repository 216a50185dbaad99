pub mod trainer;

pub use trainer::{ApplianceTrainer, TrainingStats};
