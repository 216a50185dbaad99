pub mod classifier;
pub mod profile;
pub mod scaler;

pub use classifier::{cosine_similarity, normalized_euclidean, ApplianceClassifier, Classification};
pub use profile::ApplianceProfile;
pub use scaler::StandardScaler;
