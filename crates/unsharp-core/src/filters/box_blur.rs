use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::raster::{Canvas, RgbRaster};

/// Fractional contribution of the source pixel in one blend, as `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendWeight {
    pub num: i32,
    pub den: i32,
}

impl BlendWeight {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Weight as a percentage, e.g. 1/3 -> 33.333...
    pub fn percent(self) -> f64 {
        100.0 * self.num as f64 / self.den as f64
    }
}

/// How a weighted blend is brought back to an 8-bit channel value.
///
/// The sharp and reference canvases must always be blurred with the same
/// rule so that their quantization drift cancels in the composite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendRounding {
    /// `dst + trunc((src - dst) * weight)` in exact integer arithmetic.
    /// A blend of a value with itself is lossless.
    #[default]
    TowardDestination,
    /// `trunc(src * p / 100 + dst * (100 - p) / 100)` in floating point, with
    /// `p` truncated to a whole percentage (33.3% -> 33, 16.7% -> 16).
    /// Mirrors the merge arithmetic of palette-era graphics libraries.
    ///
    /// Self-blends are lossy here (59 merged with itself at 16% gives 58).
    /// Border pixels skip the offset steps whose source lies outside the
    /// raster but the reference canvas does not, so even a flat raster comes
    /// out of the filter with a shifted one-pixel border.
    Legacy,
}

impl BlendRounding {
    /// Blend one channel of `src` into `dst` with the given weight.
    pub fn blend(self, dst: u8, src: u8, weight: BlendWeight) -> u8 {
        match self {
            Self::TowardDestination => {
                let delta = (src as i32 - dst as i32) * weight.num / weight.den;
                (dst as i32 + delta) as u8
            }
            Self::Legacy => {
                let pct = weight.percent().trunc();
                let mixed = src as f64 * (pct / 100.0) + dst as f64 * ((100.0 - pct) / 100.0);
                mixed as u8
            }
        }
    }
}

/// One operation of a blur iteration.
///
/// The destination pixel `(x, y)` reads the source pixel `(x + dx, y + dy)`.
/// Destination pixels whose source would fall outside the raster are left
/// as they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendStep {
    pub name: &'static str,
    pub dx: isize,
    pub dy: isize,
    /// `None` copies the source pixel outright.
    pub weight: Option<BlendWeight>,
}

impl BlendStep {
    const fn copy(name: &'static str, dx: isize, dy: isize) -> Self {
        Self {
            name,
            dx,
            dy,
            weight: None,
        }
    }

    const fn merge(name: &'static str, dx: isize, dy: isize, num: i32, den: i32) -> Self {
        Self {
            name,
            dx,
            dy,
            weight: Some(BlendWeight::new(num, den)),
        }
    }

    /// The same operation applied without spatial offset.
    pub fn without_offset(self) -> Self {
        Self {
            dx: 0,
            dy: 0,
            ..self
        }
    }
}

/// The 3x3 kernel
///
/// ```text
///  1   2   1
///  2   4   2
///  1   2   1
/// ```
///
/// approximated by shifting the image one pixel at a time and merging each
/// shifted copy with a running weight. Order matters: every merge reads the
/// destination as the previous step left it.
pub const BLUR_STEPS: [BlendStep; 9] = [
    BlendStep::copy("up-left", 1, 1),
    BlendStep::merge("down-right", -1, -1, 1, 2),
    BlendStep::merge("down-left", 1, -1, 1, 3),
    BlendStep::merge("up-right", -1, 1, 1, 4),
    BlendStep::merge("left", 1, 0, 1, 3),
    BlendStep::merge("right", -1, 0, 1, 4),
    BlendStep::merge("up", 0, 1, 1, 5),
    BlendStep::merge("down", 0, -1, 1, 6),
    BlendStep::merge("center", 0, 0, 1, 2),
];

/// Apply one step: read from `src`, write into `dst`.
///
/// Only the sub-rectangle whose shifted source lies inside the raster is
/// written; the one-pixel strip on the edge the offset points away from
/// keeps its current value.
pub fn apply_step(dst: &mut Canvas, src: &Canvas, step: &BlendStep, rounding: BlendRounding) {
    debug_assert!(dst.same_dimensions(src));

    let w = src.width() as usize;
    let h = src.height() as usize;
    let x0 = (-step.dx).max(0) as usize;
    let y0 = (-step.dy).max(0) as usize;
    let x1 = w.saturating_sub(step.dx.max(0) as usize);
    let y1 = h.saturating_sub(step.dy.max(0) as usize);
    trace!(step = step.name, dx = step.dx, dy = step.dy, "Blend step");

    for y in y0..y1 {
        let sy = (y as isize + step.dy) as usize;
        for x in x0..x1 {
            let sx = (x as isize + step.dx) as usize;
            let source = src.pixel(sx, sy);
            let target = dst.pixel_mut(x, y);
            match step.weight {
                None => *target = source,
                Some(weight) => {
                    for c in 0..CHANNEL_COUNT {
                        target[c] = rounding.blend(target[c], source[c], weight);
                    }
                }
            }
        }
    }
}

/// One spatial blur iteration: the nine offset steps into `next`, then
/// `next` is copied back into `canvas`.
pub fn blur_iteration(canvas: &mut Canvas, next: &mut Canvas, rounding: BlendRounding) {
    for step in &BLUR_STEPS {
        apply_step(next, canvas, step, rounding);
    }
    canvas.copy_from(next);
}

/// The same nine steps as [`blur_iteration`] without spatial offset.
///
/// Every pixel takes all nine roundings, which matches its blurred
/// counterpart only where no offset step is clipped. With
/// [`BlendRounding::TowardDestination`] a self-blend is exact, so the
/// reference equals the input and the mismatch on the border is moot. With
/// [`BlendRounding::Legacy`] the one-pixel border strip drifts away from the
/// blurred canvas.
pub fn reference_iteration(canvas: &mut Canvas, next: &mut Canvas, rounding: BlendRounding) {
    for step in &BLUR_STEPS {
        apply_step(next, canvas, &step.without_offset(), rounding);
    }
    canvas.copy_from(next);
}

/// The four scratch canvases of one filter invocation.
pub struct BlurCanvases {
    sharp: Canvas,
    sharp_next: Canvas,
    reference: Canvas,
    reference_next: Canvas,
}

impl BlurCanvases {
    /// Snapshot `source` into all four canvases.
    ///
    /// Every canvas is allocated before this returns, so a failure here leaves
    /// nothing half-built and `source` untouched.
    pub fn allocate(source: &dyn RgbRaster) -> Result<Self> {
        let sharp = Canvas::try_from_raster(source)?;
        let sharp_next = sharp.try_clone()?;
        let reference = sharp.try_clone()?;
        let reference_next = sharp.try_clone()?;

        debug!(
            width = sharp.width(),
            height = sharp.height(),
            "Allocated blur canvases"
        );

        Ok(Self {
            sharp,
            sharp_next,
            reference,
            reference_next,
        })
    }

    /// Run `iterations` rounds on both canvas pairs.
    ///
    /// `progress(done, total)` is called after every iteration.
    pub fn run<P>(&mut self, iterations: u32, rounding: BlendRounding, mut progress: P)
    where
        P: FnMut(usize, usize),
    {
        let total = iterations as usize;
        let pixels = self.sharp.width() as usize * self.sharp.height() as usize;
        let parallel = pixels >= PARALLEL_PIXEL_THRESHOLD;

        let Self {
            sharp,
            sharp_next,
            reference,
            reference_next,
        } = self;

        for done in 1..=total {
            if parallel {
                rayon::join(
                    || blur_iteration(sharp, sharp_next, rounding),
                    || reference_iteration(reference, reference_next, rounding),
                );
            } else {
                blur_iteration(sharp, sharp_next, rounding);
                reference_iteration(reference, reference_next, rounding);
            }
            progress(done, total);
        }
    }

    /// The spatially blurred canvas.
    pub fn sharp(&self) -> &Canvas {
        &self.sharp
    }

    /// The drift-matched, unblurred canvas.
    pub fn reference(&self) -> &Canvas {
        &self.reference
    }
}
