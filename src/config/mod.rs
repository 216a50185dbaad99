pub mod traits;
pub mod detection;
pub mod matching;
pub mod features;
pub mod classification;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use detection::DetectionConfig;
pub use matching::MatchingConfig;
pub use features::FeatureConfig;
pub use classification::{ClassificationConfig, SimilarityMetric};
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
