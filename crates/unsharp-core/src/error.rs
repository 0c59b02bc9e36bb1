use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnsharpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidRaster { width: u32, height: u32 },

    #[error("Scratch canvas is {width}x{height}, target raster is {expected_width}x{expected_height}")]
    CanvasMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to allocate {bytes} bytes of scratch raster memory")]
    ScratchAllocation { bytes: usize },

    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, UnsharpError>;
