use crate::ml::features::FeatureVector;
use crate::types::ApplianceId;
use serde::{Deserialize, Serialize};

/// Feature signature of one appliance, built from labeled training cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceProfile {
    id: ApplianceId,
    label: String,
    exemplars: Vec<FeatureVector>,
    signature: Option<FeatureVector>,
}

impl ApplianceProfile {
    pub fn new(id: ApplianceId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            exemplars: Vec::new(),
            signature: None,
        }
    }

    pub fn id(&self) -> ApplianceId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn exemplars(&self) -> &[FeatureVector] {
        &self.exemplars
    }

    pub fn exemplar_count(&self) -> usize {
        self.exemplars.len()
    }

    /// Mean of all exemplars; `None` before the first exemplar.
    pub fn signature(&self) -> Option<&FeatureVector> {
        self.signature.as_ref()
    }

    pub fn add_exemplar(&mut self, features: FeatureVector) {
        self.exemplars.push(features);
        self.signature = FeatureVector::mean_of(&self.exemplars);
    }
}
