use crate::consts::CHANNEL_COUNT;
use crate::error::{Result, UnsharpError};
use crate::raster::{Canvas, Pixel, RgbRaster};

/// What the composite pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Pixels of the target raster that were overwritten.
    pub pixels_written: usize,
    /// Channels whose difference passed the threshold and were amplified.
    pub channels_sharpened: usize,
}

/// Sharpen one channel.
///
/// Differences at or above `threshold` are amplified by `amount` around the
/// reference value; smaller ones fall back to the reference value itself.
pub fn sharpen_channel(reference: u8, blurred: u8, amount: f32, threshold: f32) -> (u8, bool) {
    let diff = reference as i32 - blurred as i32;
    if diff.abs() as f32 >= threshold {
        let boosted = (amount * diff as f32 + reference as f32).round();
        (boosted.clamp(0.0, 255.0) as u8, true)
    } else {
        (reference, false)
    }
}

/// Write the amplified, threshold-gated difference of the two canvases into
/// `target`.
///
/// Pixels whose new value equals their current one are not written.
pub fn composite(
    target: &mut dyn RgbRaster,
    sharp: &Canvas,
    reference: &Canvas,
    amount: f32,
    threshold: f32,
) -> Result<CompositeStats> {
    let (width, height) = (target.width(), target.height());
    for canvas in [sharp, reference] {
        if canvas.width() != width || canvas.height() != height {
            return Err(UnsharpError::CanvasMismatch {
                expected_width: width,
                expected_height: height,
                width: canvas.width(),
                height: canvas.height(),
            });
        }
    }

    let mut stats = CompositeStats::default();
    for y in 0..height {
        for x in 0..width {
            let ref_px = reference.pixel(x as usize, y as usize);
            let blur_px = sharp.pixel(x as usize, y as usize);

            let mut new_px: Pixel = [0; CHANNEL_COUNT];
            for c in 0..CHANNEL_COUNT {
                let (value, sharpened) = sharpen_channel(ref_px[c], blur_px[c], amount, threshold);
                new_px[c] = value;
                stats.channels_sharpened += sharpened as usize;
            }

            if target.get_pixel(x, y) != new_px {
                target.put_pixel(x, y, new_px);
                stats.pixels_written += 1;
            }
        }
    }

    Ok(stats)
}
