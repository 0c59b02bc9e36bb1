use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::effect::{EffectRegistry, UnsharpMask};
use crate::error::{Result, UnsharpError};
use crate::filters::unsharp_mask::UnsharpParams;

/// A batch job: named unsharp mask presets and the order to apply them in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Preset names, applied in order. May repeat.
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub presets: BTreeMap<String, UnsharpParams>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert("default".to_string(), UnsharpParams::default());
        Self {
            input: PathBuf::from("input.png"),
            output: PathBuf::from("sharpened.png"),
            steps: vec!["default".to_string()],
            presets,
        }
    }
}

impl FilterConfig {
    /// Check that every step names a preset.
    pub fn validate(&self) -> Result<()> {
        match self.steps.iter().find(|s| !self.presets.contains_key(*s)) {
            Some(missing) => Err(UnsharpError::UnknownEffect(missing.clone())),
            None => Ok(()),
        }
    }

    /// Build a registry with one unsharp mask effect per preset.
    pub fn registry(&self) -> EffectRegistry {
        let mut registry = EffectRegistry::new();
        for (name, params) in &self.presets {
            registry.register(Box::new(UnsharpMask::named(name.clone(), *params)));
        }
        registry
    }
}
