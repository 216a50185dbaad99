use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::WattsplitError;
use serde::{Deserialize, Serialize};

/// How a tag window is widened before it is matched against detected cycles.
/// Appliances reach steady draw after the tagged ON event and keep drawing
/// past the tagged OFF event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub on_shift_ratio: f64,      // on' = on + ratio * duration
    pub off_extension_ratio: f64, // off' = off + ratio * duration
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            on_shift_ratio: 0.2,
            off_extension_ratio: 0.5,
        }
    }
}

impl ConfigSection for MatchingConfig {
    fn section_name() -> &'static str {
        "matching"
    }

    fn validate(&self) -> Result<(), WattsplitError> {
        if self.off_extension_ratio < 0.0 {
            return Err(WattsplitError::Configuration(
                "Off extension ratio must be non-negative".to_string(),
            ));
        }
        if self.on_shift_ratio < 0.0 || self.on_shift_ratio >= 1.0 + self.off_extension_ratio {
            return Err(WattsplitError::Configuration(
                "On shift ratio must keep the widened window non-empty".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Matching".to_string(),
            fields: vec![
                FieldManifest::new(
                    "on_shift_ratio",
                    "float",
                    serde_json::json!(self.on_shift_ratio),
                    (Some(0.0), None),
                    "Tag ON time is moved later by this share of the tag duration",
                ),
                FieldManifest::new(
                    "off_extension_ratio",
                    "float",
                    serde_json::json!(self.off_extension_ratio),
                    (Some(0.0), None),
                    "Tag OFF time is moved later by this share of the tag duration",
                ),
            ],
        }
    }
}
