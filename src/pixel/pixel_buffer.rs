use super::rgba::*;

use itertools::*;

use std::fmt;

///
/// An 8-bpp packed RGBA raster for a single layer
///
/// Pixels are stored row-major, four bytes per pixel, so the byte index of the pixel at
/// `(x, y)` is `(y*width + x)*4`. The byte vector is always exactly `width*height*4` long:
/// constructors allocate it that way and every resizing operation builds a fresh buffer
/// rather than adjusting the old one in place.
///
/// `PixelBuffer` has value semantics: cloning one produces an independent deep copy, which
/// is what makes layer duplication, clipboard content and history snapshots safe to hold
/// on to while the original keeps being edited.
///
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// The width of the buffer in pixels
    width: i32,

    /// The height of the buffer in pixels
    height: i32,

    /// The packed RGBA bytes, row-major
    pixels: Vec<u8>,
}

impl PixelBuffer {
    ///
    /// Creates a fully transparent buffer of the specified size
    ///
    pub fn new(width: i32, height: i32) -> PixelBuffer {
        assert!(width > 0 && height > 0, "pixel buffers must have positive dimensions");

        PixelBuffer {
            width:  width,
            height: height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    ///
    /// Creates a buffer from existing packed RGBA bytes
    ///
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<u8>) -> PixelBuffer {
        assert!(width > 0 && height > 0, "pixel buffers must have positive dimensions");
        assert!(pixels.len() == (width as usize) * (height as usize) * 4, "pixel data must be width*height*4 bytes");

        PixelBuffer {
            width:  width,
            height: height,
            pixels: pixels,
        }
    }

    #[inline] pub fn width(&self) -> i32 { self.width }
    #[inline] pub fn height(&self) -> i32 { self.height }

    ///
    /// The packed RGBA bytes of this buffer
    ///
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    ///
    /// True if the coordinates lie within this buffer
    ///
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    ///
    /// Reads the pixel at a coordinate, returning transparent for anything out of range
    ///
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Rgba {
        if !self.contains(x, y) {
            return Rgba::TRANSPARENT;
        }

        let idx = self.index_of(x, y);
        Rgba([self.pixels[idx], self.pixels[idx+1], self.pixels[idx+2], self.pixels[idx+3]])
    }

    ///
    /// Writes the pixel at a coordinate, returning false without mutating anything if the
    /// coordinate is out of range
    ///
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) -> bool {
        if !self.contains(x, y) {
            return false;
        }

        let idx = self.index_of(x, y);
        self.pixels[idx..idx+4].copy_from_slice(&color.0);

        true
    }

    ///
    /// Sets every pixel in the buffer to a single colour
    ///
    pub fn fill(&mut self, color: Rgba) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color.0);
        }
    }

    ///
    /// Resets every pixel in the buffer to transparent
    ///
    pub fn clear(&mut self) {
        for byte in self.pixels.iter_mut() {
            *byte = 0;
        }
    }

    ///
    /// True if every pixel in the buffer is fully transparent
    ///
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().skip(3).step_by(4).all(|alpha| *alpha == 0)
    }

    ///
    /// Copies a rectangular region out into a new buffer
    ///
    /// Parts of the region that fall outside this buffer read as transparent.
    ///
    pub fn region(&self, left: i32, top: i32, width: i32, height: i32) -> PixelBuffer {
        let mut copy = PixelBuffer::new(width, height);

        for (y, x) in (0..height).cartesian_product(0..width) {
            copy.set_pixel(x, y, self.pixel(left + x, top + y));
        }

        copy
    }

    ///
    /// Resizes by keeping every pixel at its coordinate: content outside the new bounds is
    /// discarded and any new area is transparent
    ///
    pub fn crop_extend(&self, new_width: i32, new_height: i32) -> PixelBuffer {
        self.region(0, 0, new_width, new_height)
    }

    ///
    /// Resizes by nearest-neighbour sampling: every destination pixel reads the source pixel
    /// at the proportional coordinate, clamped to the source bounds
    ///
    pub fn rescale_nearest(&self, new_width: i32, new_height: i32) -> PixelBuffer {
        let mut scaled = PixelBuffer::new(new_width, new_height);

        for (y, x) in (0..new_height).cartesian_product(0..new_width) {
            let src_x = ((x as i64 * self.width as i64) / new_width as i64) as i32;
            let src_y = ((y as i64 * self.height as i64) / new_height as i64) as i32;

            let src_x = src_x.min(self.width - 1);
            let src_y = src_y.min(self.height - 1);

            scaled.set_pixel(x, y, self.pixel(src_x, src_y));
        }

        scaled
    }

    ///
    /// Rotates the buffer a quarter turn clockwise (the top row becomes the right column)
    ///
    /// This is an exact transpose-and-mirror of the pixel grid: no resampling happens and
    /// four clockwise rotations reproduce the original buffer.
    ///
    pub fn rotated_cw(&self) -> PixelBuffer {
        let mut rotated = PixelBuffer::new(self.height, self.width);

        for (y, x) in (0..self.width).cartesian_product(0..self.height) {
            rotated.set_pixel(x, y, self.pixel(y, self.height - 1 - x));
        }

        rotated
    }

    ///
    /// Rotates the buffer a quarter turn counter-clockwise (the top row becomes the left column)
    ///
    pub fn rotated_ccw(&self) -> PixelBuffer {
        let mut rotated = PixelBuffer::new(self.height, self.width);

        for (y, x) in (0..self.width).cartesian_product(0..self.height) {
            rotated.set_pixel(x, y, self.pixel(self.width - 1 - y, x));
        }

        rotated
    }

    ///
    /// Mirrors the buffer along its vertical axis (left and right swap)
    ///
    pub fn flipped_horizontal(&self) -> PixelBuffer {
        let mut flipped = PixelBuffer::new(self.width, self.height);

        for (y, x) in (0..self.height).cartesian_product(0..self.width) {
            flipped.set_pixel(x, y, self.pixel(self.width - 1 - x, y));
        }

        flipped
    }

    ///
    /// Mirrors the buffer along its horizontal axis (top and bottom swap)
    ///
    pub fn flipped_vertical(&self) -> PixelBuffer {
        let mut flipped = PixelBuffer::new(self.width, self.height);

        for (y, x) in (0..self.height).cartesian_product(0..self.width) {
            flipped.set_pixel(x, y, self.pixel(x, self.height - 1 - y));
        }

        flipped
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "PixelBuffer({}x{})", self.width, self.height)
    }
}
