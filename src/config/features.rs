use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::WattsplitError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub power_factor_harmonic: usize, // 0 = fundamental
    pub signature_row_width: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            power_factor_harmonic: 0,
            signature_row_width: 40,
        }
    }
}

impl ConfigSection for FeatureConfig {
    fn section_name() -> &'static str {
        "features"
    }

    fn validate(&self) -> Result<(), WattsplitError> {
        if self.signature_row_width < 3 {
            return Err(WattsplitError::Configuration(
                "Signature row width must be at least 3".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Features".to_string(),
            fields: vec![
                FieldManifest::new(
                    "power_factor_harmonic",
                    "integer",
                    serde_json::json!(self.power_factor_harmonic),
                    (Some(0.0), None),
                    "Harmonic component used for the power factor features",
                ),
                FieldManifest::new(
                    "signature_row_width",
                    "integer",
                    serde_json::json!(self.signature_row_width),
                    (Some(3.0), None),
                    "Row width used when folding a series for the pattern signature",
                ),
            ],
        }
    }
}
