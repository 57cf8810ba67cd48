//! The hardware frame: one color per pixel across both solids.

use crate::color::Rgb;
use crate::math8::scale8;
use crate::topology::PIXELS;

/// Flat color buffer committed to the pixel driver once per frame.
///
/// Single owner; animations write it only during their own draw call.
/// Indices come from validated topology lookups, so an out-of-range access
/// is an invariant violation and panics.
pub struct PixelBuffer {
    pixels: [Rgb; PIXELS],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb::new(0, 0, 0); PIXELS],
        }
    }

    pub fn set(&mut self, index: usize, color: Rgb) {
        self.pixels[index] = color;
    }

    pub fn get(&self, index: usize) -> Rgb {
        self.pixels[index]
    }

    /// Scale every channel of every pixel toward zero by `amount`.
    ///
    /// Motion-trail decay: repeated calls take the whole frame to black.
    pub fn fade_by(&mut self, amount: u8) {
        let keep = 255 - amount;
        for pixel in &mut self.pixels {
            pixel.r = scale8(pixel.r, keep);
            pixel.g = scale8(pixel.g, keep);
            pixel.b = scale8(pixel.b, keep);
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [Rgb::new(0, 0, 0); PIXELS];
    }

    /// The frame as the driver expects it.
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }
}
