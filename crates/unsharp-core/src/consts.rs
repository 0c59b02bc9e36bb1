/// Minimum pixel count (h*w) to blur the sharp and reference canvases
/// concurrently with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Upper bound applied to the raw `amount` parameter.
pub const MAX_AMOUNT: f32 = 500.0;

/// Scale from the percent-like `amount` to the internal gain.
/// 500 maps to a gain of 8.0.
pub const AMOUNT_SCALE: f32 = 0.016;

/// Upper bound applied to the raw `radius` parameter.
pub const MAX_RADIUS: f32 = 50.0;

/// Blur iterations per unit of radius.
pub const ITERATIONS_PER_RADIUS: f32 = 2.0;

/// Largest iteration count the normalizer hands to the blur stage.
pub const MAX_ITERATIONS: u32 = 100;

/// Upper bound applied to the raw `threshold` parameter.
pub const MAX_THRESHOLD: f32 = 255.0;

/// Number of channels per pixel (R, G, B).
pub const CHANNEL_COUNT: usize = 3;
