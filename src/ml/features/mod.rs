pub mod extractor;
pub mod signature;
pub mod stats;
pub mod vector;

pub use extractor::FeatureExtractor;
pub use signature::pattern_signature;
pub use vector::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
