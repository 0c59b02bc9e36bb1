mod common;

use image::{Rgb, RgbImage};

use unsharp_core::error::UnsharpError;
use unsharp_core::filters::box_blur::BlendRounding;
use unsharp_core::filters::composite::sharpen_channel;
use unsharp_core::filters::normalize::NoOpReason;
use unsharp_core::filters::unsharp_mask::{
    unsharp_mask, unsharp_mask_with_progress, UnsharpOutcome, UnsharpParams,
};
use unsharp_core::raster::{Canvas, Pixel, RgbRaster};

use common::{blur, center_block_canvas, flat_canvas};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn params(amount: f32, radius: f32, threshold: f32) -> UnsharpParams {
    UnsharpParams {
        amount,
        radius,
        threshold,
        rounding: BlendRounding::TowardDestination,
    }
}

fn two_pixel_row() -> Canvas {
    Canvas::try_from_fn(2, 1, |x, _| if x == 0 { [0; 3] } else { [120; 3] }).unwrap()
}

fn filtered(source: &Canvas, p: UnsharpParams) -> Canvas {
    let mut out = source.clone();
    unsharp_mask(&mut out, &p).unwrap();
    out
}

/// Host raster that reports huge dimensions but holds no pixels.
struct OversizedRaster;

impl RgbRaster for OversizedRaster {
    fn width(&self) -> u32 {
        u32::MAX
    }

    fn height(&self) -> u32 {
        u32::MAX
    }

    fn get_pixel(&self, _x: u32, _y: u32) -> Pixel {
        [0, 0, 0]
    }

    fn put_pixel(&mut self, _x: u32, _y: u32, _pixel: Pixel) {
        panic!("raster must not be written when scratch allocation fails");
    }
}

// ---------------------------------------------------------------------------
// No-op parameters
// ---------------------------------------------------------------------------

#[test]
fn test_zero_amount_leaves_raster_untouched() {
    let source = center_block_canvas();
    let mut raster = source.clone();
    let outcome = unsharp_mask(&mut raster, &params(0.0, 10.0, 0.0)).unwrap();
    assert_eq!(outcome, UnsharpOutcome::Skipped(NoOpReason::ZeroAmount));
    assert_eq!(raster, source);
}

#[test]
fn test_zero_radius_leaves_raster_untouched() {
    let source = center_block_canvas();
    let mut raster = source.clone();
    let outcome = unsharp_mask(&mut raster, &params(100.0, 0.1, 0.0)).unwrap();
    assert_eq!(outcome, UnsharpOutcome::Skipped(NoOpReason::ZeroRadius));
    assert_eq!(raster, source);
}

#[test]
fn test_noop_reports_no_progress() {
    let mut raster = center_block_canvas();
    let mut calls = 0;
    unsharp_mask_with_progress(&mut raster, &params(0.0, 10.0, 0.0), |_, _| calls += 1).unwrap();
    assert_eq!(calls, 0);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_empty_raster_is_invalid() {
    let mut img = RgbImage::new(0, 3);
    let err = unsharp_mask(&mut img, &params(100.0, 1.0, 0.0)).unwrap_err();
    assert!(matches!(err, UnsharpError::InvalidRaster { width: 0, height: 3 }));
}

#[test]
fn test_empty_raster_is_invalid_even_for_noop_params() {
    let mut img = RgbImage::new(3, 0);
    let err = unsharp_mask(&mut img, &params(0.0, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, UnsharpError::InvalidRaster { width: 3, height: 0 }));
}

#[test]
fn test_scratch_allocation_failure_leaves_raster_untouched() {
    let mut raster = OversizedRaster;
    let err = unsharp_mask(&mut raster, &params(100.0, 1.0, 0.0)).unwrap_err();
    assert!(matches!(err, UnsharpError::ScratchAllocation { .. }));
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn test_amount_above_500_matches_500() {
    let source = center_block_canvas();
    assert_eq!(
        filtered(&source, params(500.0, 1.0, 0.0)),
        filtered(&source, params(5000.0, 1.0, 0.0))
    );
}

#[test]
fn test_radius_above_50_matches_50() {
    let source = center_block_canvas();
    assert_eq!(
        filtered(&source, params(100.0, 50.0, 0.0)),
        filtered(&source, params(100.0, 500.0, 0.0))
    );
}

#[test]
fn test_threshold_above_255_matches_255() {
    let source = center_block_canvas();
    let at_limit = filtered(&source, params(100.0, 0.5, 255.0));
    let above = filtered(&source, params(100.0, 0.5, 1000.0));
    assert_eq!(at_limit, above);
    // One iteration never moves a channel a full 255 away from its reference.
    assert_eq!(at_limit, source);
}

#[test]
fn test_negative_radius_matches_positive() {
    let source = center_block_canvas();
    assert_eq!(
        filtered(&source, params(100.0, -1.0, 0.0)),
        filtered(&source, params(100.0, 1.0, 0.0))
    );
}

// ---------------------------------------------------------------------------
// Threshold gate
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_gate_one_above_step() {
    // After one iteration the right pixel blurs 120 -> 105, a step of 15.
    let source = two_pixel_row();
    let mut raster = source.clone();
    let outcome = unsharp_mask(&mut raster, &params(100.0, 0.5, 16.0)).unwrap();
    assert_eq!(raster, source);
    match outcome {
        UnsharpOutcome::Applied { iterations, stats } => {
            assert_eq!(iterations, 1);
            assert_eq!(stats.pixels_written, 0);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[test]
fn test_threshold_gate_exact_step() {
    let source = two_pixel_row();
    let mut raster = source.clone();
    unsharp_mask(&mut raster, &params(100.0, 0.5, 15.0)).unwrap();
    // 1.6 * 15 + 120 = 144
    assert_eq!(raster.get_pixel(1, 0), [144; 3]);
    // Left pixel: 1.6 * (0 - 20) + 0 clamps to 0.
    assert_eq!(raster.get_pixel(0, 0), [0; 3]);
}

#[test]
fn test_negative_amount_softens() {
    let mut raster = two_pixel_row();
    unsharp_mask(&mut raster, &params(-100.0, 0.5, 0.0)).unwrap();
    // -1.6 * 15 + 120 = 96, -1.6 * -20 + 0 = 32
    assert_eq!(raster.get_pixel(1, 0), [96; 3]);
    assert_eq!(raster.get_pixel(0, 0), [32; 3]);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn test_center_block_end_to_end() {
    let source = center_block_canvas();
    let p = params(100.0, 10.0, 0.0);

    let mut raster = source.clone();
    let outcome = unsharp_mask(&mut raster, &p).unwrap();

    let canvases = blur(&source, 20, BlendRounding::TowardDestination);
    for y in 0..4 {
        for x in 0..4 {
            let reference = canvases.reference().pixel(x, y);
            let blurred = canvases.sharp().pixel(x, y);
            let out = raster.pixel(x, y);
            for c in 0..3 {
                let (expected, _) = sharpen_channel(reference[c], blurred[c], 1.6, 0.0);
                assert_eq!(out[c], expected, "pixel ({x},{y}) channel {c}");
            }
        }
    }

    // Lossless self-blends keep the reference equal to the input, and every
    // channel is a full 0/255 swing, so amplification clamps back onto it.
    assert_eq!(canvases.reference(), &source);
    assert_eq!(raster, source);
    assert_eq!(raster.pixel(1, 1), [255; 3]);
    assert_eq!(raster.pixel(2, 2), [255; 3]);
    assert_eq!(raster.pixel(0, 0), [0; 3]);
    assert_eq!(raster.pixel(3, 2), [0; 3]);
    // Twenty iterations smear the block into a near-flat grey.
    assert_eq!(canvases.sharp().pixel(0, 0), [90; 3]);
    assert_eq!(canvases.sharp().pixel(3, 0), [87; 3]);
    assert_eq!(canvases.sharp().pixel(1, 2), [92; 3]);

    match outcome {
        UnsharpOutcome::Applied { iterations, stats } => {
            assert_eq!(iterations, 20);
            assert_eq!(stats.channels_sharpened, 4 * 4 * 3);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[test]
fn test_center_block_boosts_contrast() {
    let source = center_block_canvas();
    let out = filtered(&source, params(100.0, 1.0, 0.0));
    // The white block stays white and its dark surround stays dark.
    assert_eq!(out.pixel(1, 1), [255; 3]);
    assert_eq!(out.pixel(3, 3), [0; 3]);
}

#[test]
fn test_flat_raster_is_unchanged() {
    let source = flat_canvas(7, 5, [12, 200, 99]);
    assert_eq!(filtered(&source, params(500.0, 5.0, 0.0)), source);
}

#[test]
fn test_progress_counts_iterations() {
    let mut raster = center_block_canvas();
    let mut last = (0, 0);
    let mut calls = 0;
    unsharp_mask_with_progress(&mut raster, &params(100.0, 1.5, 0.0), |done, total| {
        calls += 1;
        last = (done, total);
    })
    .unwrap();
    assert_eq!(calls, 3);
    assert_eq!(last, (3, 3));
}

#[test]
fn test_rgb_image_matches_canvas() {
    let source = center_block_canvas();
    let mut img = RgbImage::from_fn(4, 4, |x, y| Rgb(source.pixel(x as usize, y as usize)));

    let p = params(150.0, 2.0, 4.0);
    unsharp_mask(&mut img, &p).unwrap();
    let expected = filtered(&source, p);

    for (x, y, px) in img.enumerate_pixels() {
        assert_eq!(px.0, expected.pixel(x as usize, y as usize), "({x},{y})");
    }
}

// ---------------------------------------------------------------------------
// Legacy rounding
// ---------------------------------------------------------------------------

fn legacy(amount: f32, radius: f32, threshold: f32) -> UnsharpParams {
    UnsharpParams {
        rounding: BlendRounding::Legacy,
        ..params(amount, radius, threshold)
    }
}

#[test]
fn test_legacy_rounding_two_pixel_row() {
    // One iteration blurs [0, 100] to [16, 87]; the reference stays [0, 100].
    //   1.6 * (0 - 16) + 0     = -25.6 -> 0
    //   1.6 * (100 - 87) + 100 = 120.8 -> 121
    let mut raster = Canvas::try_from_fn(2, 1, |x, _| if x == 0 { [0; 3] } else { [100; 3] }).unwrap();
    let outcome = unsharp_mask(&mut raster, &legacy(100.0, 0.5, 0.0)).unwrap();
    assert_eq!(raster.pixel(0, 0), [0; 3]);
    assert_eq!(raster.pixel(1, 0), [121; 3]);
    match outcome {
        UnsharpOutcome::Applied { iterations, stats } => {
            assert_eq!(iterations, 1);
            assert_eq!(stats.pixels_written, 1);
            assert_eq!(stats.channels_sharpened, 6);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[test]
fn test_legacy_rounding_shifts_flat_raster() {
    // Interior and reference both drift 59 -> 58; the top row keeps 59 in the
    // blurred canvas, and 1.6 * (58 - 59) + 58 = 56.4 -> 56.
    let source = flat_canvas(4, 4, [59, 59, 59]);
    let out = filtered(&source, legacy(100.0, 0.5, 0.0));
    for x in 0..4 {
        assert_eq!(out.pixel(x, 0), [56; 3], "({x},0)");
        for y in 1..4 {
            assert_eq!(out.pixel(x, y), [58; 3], "({x},{y})");
        }
    }

    // The default rounding leaves the same raster alone.
    assert_eq!(filtered(&source, params(100.0, 0.5, 0.0)), source);
}
