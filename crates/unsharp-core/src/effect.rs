use std::collections::BTreeMap;

use crate::error::{Result, UnsharpError};
use crate::filters::unsharp_mask::{unsharp_mask, UnsharpParams};
use crate::raster::RgbRaster;

/// An in-place raster transform a host can look up by name and run.
pub trait RasterEffect: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, raster: &mut dyn RgbRaster) -> Result<()>;
}

/// Unsharp mask with a fixed parameter set.
#[derive(Clone, Debug)]
pub struct UnsharpMask {
    name: String,
    pub params: UnsharpParams,
}

impl UnsharpMask {
    pub fn new(params: UnsharpParams) -> Self {
        Self::named("unsharp_mask", params)
    }

    pub fn named(name: impl Into<String>, params: UnsharpParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl RasterEffect for UnsharpMask {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, raster: &mut dyn RgbRaster) -> Result<()> {
        unsharp_mask(raster, &self.params).map(|_| ())
    }
}

/// Host-owned table of effects, keyed by name.
#[derive(Default)]
pub struct EffectRegistry {
    effects: BTreeMap<String, Box<dyn RasterEffect>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect under its own name, replacing any previous entry.
    pub fn register(&mut self, effect: Box<dyn RasterEffect>) {
        self.effects.insert(effect.name().to_string(), effect);
    }

    pub fn get(&self, name: &str) -> Option<&dyn RasterEffect> {
        self.effects.get(name).map(|e| &**e)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Run the effect registered as `name` on `raster`.
    pub fn apply(&self, name: &str, raster: &mut dyn RgbRaster) -> Result<()> {
        let effect = self
            .get(name)
            .ok_or_else(|| UnsharpError::UnknownEffect(name.to_string()))?;
        effect.apply(raster)
    }
}
