//! # Monochrome Rasters
//!
//! The bitmap encoder only needs to ask "is this pixel black?", so any pixel
//! source can be printed by implementing [`Raster`]. [`Bitmap`] is the owned
//! buffer produced by the QR encoder and by [`graphics::decode`].
//!
//! [`graphics::decode`]: crate::protocol::graphics::decode

use image::{GrayImage, Luma};

/// A read-only monochrome pixel grid.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Whether the pixel at `(x, y)` prints. Callers only pass in-bounds
    /// coordinates.
    fn is_black(&self, x: usize, y: usize) -> bool;
}

/// Owned 1-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Create an all-white bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Create a bitmap by evaluating `f(x, y)` for every pixel.
    ///
    /// ```
    /// use usdx_printer::render::{Bitmap, Raster};
    ///
    /// let checker = Bitmap::from_fn(4, 4, |x, y| (x + y) % 2 == 0);
    /// assert!(checker.is_black(0, 0));
    /// assert!(!checker.is_black(1, 0));
    /// ```
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Set a single pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, black: bool) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = black;
        }
    }

    /// Read a single pixel; anything outside the image is white.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    /// Number of black pixels.
    pub fn black_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Convert to an 8-bit grayscale image (black = 0, white = 255).
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.get(x as usize, y as usize) {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        })
    }
}

impl Raster for Bitmap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        self.get(x, y)
    }
}

/// Only pure black (luma 0) prints; every other shade is paper.
impl Raster for GrayImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        self.get_pixel(x as u32, y as u32).0[0] == 0
    }
}
