#![allow(dead_code)]

use unsharp_core::filters::box_blur::{BlendRounding, BlurCanvases};
use unsharp_core::raster::{Canvas, Pixel, RgbRaster};

/// Canvas filled with a single color.
pub fn flat_canvas(width: u32, height: u32, pixel: Pixel) -> Canvas {
    Canvas::try_from_fn(width, height, |_, _| pixel).expect("flat canvas")
}

/// 4x4 black canvas with a white 2x2 block in the middle.
pub fn center_block_canvas() -> Canvas {
    Canvas::try_from_fn(4, 4, |x, y| {
        if (1..3).contains(&x) && (1..3).contains(&y) {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    })
    .expect("center block canvas")
}

/// Black on the left, white from column `edge` on.
pub fn vertical_edge_canvas(width: u32, height: u32, edge: u32) -> Canvas {
    Canvas::try_from_fn(width, height, |x, _| {
        if x >= edge {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    })
    .expect("edge canvas")
}

/// Run the blur stage on its own and return the canvases.
pub fn blur(source: &dyn RgbRaster, iterations: u32, rounding: BlendRounding) -> BlurCanvases {
    let mut canvases = BlurCanvases::allocate(source).expect("allocate canvases");
    canvases.run(iterations, rounding, |_, _| {});
    canvases
}
