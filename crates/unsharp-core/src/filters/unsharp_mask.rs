use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::filters::box_blur::{BlendRounding, BlurCanvases};
use crate::filters::composite::{composite, CompositeStats};
use crate::filters::normalize::{normalize, NoOpReason, Normalization};
use crate::raster::{validate_dimensions, RgbRaster};

/// User-facing unsharp mask parameters.
///
/// Values are taken as given and clamped during normalization; nothing here
/// is ever rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnsharpParams {
    /// Strength in percent-like units, clamped to 500.
    pub amount: f32,
    /// Blur radius, clamped to 50. Each unit is two blur iterations.
    pub radius: f32,
    /// Minimum channel difference (0..=255) that gets sharpened.
    pub threshold: f32,
    #[serde(default)]
    pub rounding: BlendRounding,
}

impl Default for UnsharpParams {
    fn default() -> Self {
        Self {
            amount: 80.0,
            radius: 0.5,
            threshold: 3.0,
            rounding: BlendRounding::default(),
        }
    }
}

/// Result of one filter invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsharpOutcome {
    /// Parameters normalized to a no-op; the raster was not touched.
    Skipped(NoOpReason),
    Applied {
        iterations: u32,
        stats: CompositeStats,
    },
}

/// Sharpen `raster` in place.
pub fn unsharp_mask(raster: &mut dyn RgbRaster, params: &UnsharpParams) -> Result<UnsharpOutcome> {
    unsharp_mask_with_progress(raster, params, |_, _| {})
}

/// Sharpen `raster` in place, reporting `(iterations_done, iterations_total)`
/// after each blur iteration.
///
/// The raster is only written by the final composite pass. Dimension errors
/// and scratch allocation failures are reported before any pixel changes.
pub fn unsharp_mask_with_progress<P>(
    raster: &mut dyn RgbRaster,
    params: &UnsharpParams,
    progress: P,
) -> Result<UnsharpOutcome>
where
    P: FnMut(usize, usize),
{
    validate_dimensions(raster.width(), raster.height())?;

    let normalized = match normalize(params) {
        Normalization::Apply(n) => n,
        Normalization::NoOp(reason) => {
            debug!(%reason, "Unsharp mask skipped");
            return Ok(UnsharpOutcome::Skipped(reason));
        }
    };
    debug!(
        amount = normalized.amount,
        iterations = normalized.iterations,
        threshold = normalized.threshold,
        rounding = ?normalized.rounding,
        "Normalized unsharp mask parameters"
    );

    let mut canvases = BlurCanvases::allocate(raster)?;
    canvases.run(normalized.iterations, normalized.rounding, progress);

    let stats = composite(
        raster,
        canvases.sharp(),
        canvases.reference(),
        normalized.amount,
        normalized.threshold,
    )?;

    info!(
        iterations = normalized.iterations,
        pixels_written = stats.pixels_written,
        channels_sharpened = stats.channels_sharpened,
        "Unsharp mask applied"
    );

    Ok(UnsharpOutcome::Applied {
        iterations: normalized.iterations,
        stats,
    })
}
