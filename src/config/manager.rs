use super::{
    classification::ClassificationConfig,
    detection::DetectionConfig,
    features::FeatureConfig,
    matching::MatchingConfig,
    traits::ConfigSection,
};
use crate::error::WattsplitError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub matching: MatchingConfig,
    pub features: FeatureConfig,
    pub classification: ClassificationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), WattsplitError> {
        self.detection.validate()?;
        self.matching.validate()?;
        self.features.validate()?;
        self.classification.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML or JSON file (format picked from the extension).
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WattsplitError> {
        let source = config::File::from(path.as_ref()).required(true);
        self.load_from_source(source)
    }

    pub fn load_from_str(
        &self,
        contents: &str,
        format: config::FileFormat,
    ) -> Result<(), WattsplitError> {
        self.load_from_source(config::File::from_str(contents, format))
    }

    fn load_from_source<S>(&self, source: S) -> Result<(), WattsplitError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: AppConfig = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WattsplitError> {
        let toml_str = toml::to_string_pretty(&self.get()?)?;

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, WattsplitError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| WattsplitError::Configuration("Config lock poisoned".to_string()))
    }

    /// Apply `f` to a copy and store it only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), WattsplitError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write_lock()?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, WattsplitError> {
        self.config
            .write()
            .map_err(|_| WattsplitError::Configuration("Config lock poisoned".to_string()))
    }
}
