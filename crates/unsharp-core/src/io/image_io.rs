use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::Result;

/// Basic facts about an image file, read without converting pixels.
#[derive(Clone, Debug)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub color_type: String,
}

/// Load an image file as 8-bit RGB, dropping alpha and widening grayscale.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)?;
    Ok(img.to_rgb8())
}

/// Save an 8-bit RGB raster, choosing the format from the file extension.
///
/// Unknown or missing extensions are written as PNG.
pub fn save_rgb(img: &RgbImage, path: &Path) -> Result<()> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => ImageFormat::Tiff,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        Some("bmp") => ImageFormat::Bmp,
        _ => ImageFormat::Png,
    };
    img.save_with_format(path, format)?;
    Ok(())
}

pub fn image_info(path: &Path) -> Result<ImageInfo> {
    let img = image::open(path)?;
    Ok(ImageInfo {
        width: img.width(),
        height: img.height(),
        color_type: format!("{:?}", img.color()),
    })
}
