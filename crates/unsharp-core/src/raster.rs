use image::{ImageBuffer, Rgb, RgbImage};
use ndarray::Array2;

use crate::consts::CHANNEL_COUNT;
use crate::error::{Result, UnsharpError};

/// One RGB sample, 8 bits per channel, in R, G, B order.
pub type Pixel = [u8; 3];

/// Pixel access a host raster must provide to be filtered in place.
///
/// Coordinates are `(x, y)` with `0 <= x < width` and `0 <= y < height`.
/// Implementations may panic on out-of-range coordinates; the filters in this
/// crate never produce them.
pub trait RgbRaster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn get_pixel(&self, x: u32, y: u32) -> Pixel;
    fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel);
}

impl RgbRaster for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        ImageBuffer::get_pixel(self, x, y).0
    }

    fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        ImageBuffer::put_pixel(self, x, y, Rgb(pixel));
    }
}

/// Reject rasters with no pixels.
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(UnsharpError::InvalidRaster { width, height });
    }
    Ok(())
}

/// Owned W x H RGB8 raster used as blur scratch space.
///
/// Pixel data is row-major, shape = (height, width).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    data: Array2<Pixel>,
}

impl Canvas {
    /// Allocate a black canvas.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        Self::try_from_fn(width, height, |_, _| [0; CHANNEL_COUNT])
    }

    /// Snapshot a host raster into a new canvas.
    pub fn try_from_raster(raster: &dyn RgbRaster) -> Result<Self> {
        Self::try_from_fn(raster.width(), raster.height(), |x, y| {
            raster.get_pixel(x, y)
        })
    }

    /// Allocate a canvas and fill each pixel from `f(x, y)`.
    ///
    /// The backing buffer is reserved up front, so running out of memory
    /// surfaces as [`UnsharpError::ScratchAllocation`] instead of aborting.
    pub fn try_from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        validate_dimensions(width, height)?;

        let (w, h) = (width as usize, height as usize);
        let len = w
            .checked_mul(h)
            .ok_or(UnsharpError::ScratchAllocation { bytes: usize::MAX })?;
        let bytes = len.saturating_mul(CHANNEL_COUNT);

        let mut pixels: Vec<Pixel> = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| UnsharpError::ScratchAllocation { bytes })?;
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }

        let data = Array2::from_shape_vec((h, w), pixels)
            .map_err(|_| UnsharpError::InvalidRaster { width, height })?;
        Ok(Self { data })
    }

    /// Copy this canvas, with the same fallible allocation as the constructors.
    pub fn try_clone(&self) -> Result<Self> {
        Self::try_from_fn(self.width(), self.height(), |x, y| {
            self.pixel(x as usize, y as usize)
        })
    }

    pub fn width(&self) -> u32 {
        self.data.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.data.nrows() as u32
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.data[[y, x]]
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut Pixel {
        &mut self.data[[y, x]]
    }

    /// Overwrite every pixel with the pixels of `other`.
    ///
    /// Both canvases must have the same dimensions.
    pub fn copy_from(&mut self, other: &Canvas) {
        self.data.assign(&other.data);
    }

    pub fn data(&self) -> &Array2<Pixel> {
        &self.data
    }

    pub fn same_dimensions(&self, other: &Canvas) -> bool {
        self.data.dim() == other.data.dim()
    }
}

impl RgbRaster for Canvas {
    fn width(&self) -> u32 {
        self.data.ncols() as u32
    }

    fn height(&self) -> u32 {
        self.data.nrows() as u32
    }

    fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        self.data[[y as usize, x as usize]]
    }

    fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        self.data[[y as usize, x as usize]] = pixel;
    }
}
