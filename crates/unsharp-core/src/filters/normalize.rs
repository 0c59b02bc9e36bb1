use crate::consts::{
    AMOUNT_SCALE, ITERATIONS_PER_RADIUS, MAX_AMOUNT, MAX_ITERATIONS, MAX_RADIUS, MAX_THRESHOLD,
};
use crate::filters::box_blur::BlendRounding;
use crate::filters::unsharp_mask::UnsharpParams;

/// Parameters in the units the blur and composite stages work in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedParams {
    /// Gain applied to the reference/blur difference.
    pub amount: f32,
    /// Number of blur iterations, 1..=`MAX_ITERATIONS`.
    pub iterations: u32,
    /// Minimum absolute channel difference that gets amplified.
    pub threshold: f32,
    pub rounding: BlendRounding,
}

/// Why a parameter set leaves the raster untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoOpReason {
    ZeroAmount,
    ZeroRadius,
}

impl std::fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "amount normalizes to zero"),
            Self::ZeroRadius => write!(f, "radius normalizes to zero iterations"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalization {
    Apply(NormalizedParams),
    NoOp(NoOpReason),
}

/// Map user-facing amount/radius/threshold into internal units.
///
/// Never fails: out-of-range values are clamped, and anything that cannot
/// produce a visible effect turns into [`Normalization::NoOp`].
///
/// - `amount' = min(amount, 500) * 0.016`
/// - `iterations = round(abs(min(radius, 50) * 2))`, at most 100
/// - `threshold' = min(threshold, 255)`
pub fn normalize(params: &UnsharpParams) -> Normalization {
    let amount = normalize_amount(params.amount);
    // NaN and -inf gains cannot be composited into a defined pixel value.
    if amount == 0.0 || !amount.is_finite() {
        return Normalization::NoOp(NoOpReason::ZeroAmount);
    }

    let iterations = normalize_radius(params.radius);
    if iterations == 0 {
        return Normalization::NoOp(NoOpReason::ZeroRadius);
    }

    Normalization::Apply(NormalizedParams {
        amount,
        iterations,
        threshold: normalize_threshold(params.threshold),
        rounding: params.rounding,
    })
}

fn normalize_amount(amount: f32) -> f32 {
    if amount.is_nan() {
        return 0.0;
    }
    amount.min(MAX_AMOUNT) * AMOUNT_SCALE
}

fn normalize_radius(radius: f32) -> u32 {
    if radius.is_nan() {
        return 0;
    }
    let scaled = (radius.min(MAX_RADIUS) * ITERATIONS_PER_RADIUS).abs().round();
    // Saturating float-to-int cast, then cap mirrored negative radii.
    (scaled as u32).min(MAX_ITERATIONS)
}

fn normalize_threshold(threshold: f32) -> f32 {
    threshold.min(MAX_THRESHOLD)
}
