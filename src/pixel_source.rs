use std::ops::Deref;

use image::{ImageBuffer, Pixel, Rgb};

/// RGB color with 8 bits per channel
pub type Color = Rgb<u8>;

/// Pixel position inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Read-only grid of RGB pixels
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Color at the given position, which must be inside the image
    fn pixel(&self, at: Coordinate) -> Color;

    /// Total number of pixels
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Iterate over all pixels in row-major order (y ascending, then x ascending)
    fn scan(&self) -> impl Iterator<Item = (Coordinate, Color)> + '_ {
        let width = self.width();
        (0..self.height()).flat_map(move |y| {
            (0..width).map(move |x| {
                let at = Coordinate::new(x, y);
                (at, self.pixel(at))
            })
        })
    }
}

/// Any 8-bit image buffer can be used, alpha and luma are converted to RGB
impl<P, Container> PixelSource for ImageBuffer<P, Container>
where
    P: Pixel<Subpixel = u8>,
    Container: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel(&self, at: Coordinate) -> Color {
        self.get_pixel(at.x, at.y).to_rgb()
    }
}
