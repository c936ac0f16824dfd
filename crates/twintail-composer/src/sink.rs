//! Frame sink
//!
//! A sink is an addressable pixel buffer with a global brightness scalar.
//! Pixels are written with absolute indices and only reach the hardware on
//! [`FrameSink::show`].

use crate::{color::Rgb, controls::Brightness, driver::LedDriver, math8::scale_rgb};

pub trait FrameSink {
    /// Number of addressable pixels
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set one pixel. Indices outside `0..len()` are ignored.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Set the global brightness applied on the next `show`
    fn set_brightness(&mut self, brightness: Brightness);

    /// Flush the buffer to the strip
    fn show(&mut self);
}

/// Buffered [`FrameSink`] over an [`LedDriver`]
///
/// Keeps unscaled pixel values between frames, so a mode that leaves pixels
/// untouched keeps showing the previous frame. Brightness is applied with
/// `scale8` on the way out.
pub struct FrameBuffer<D: LedDriver, const N: usize> {
    driver: D,
    pixels: [Rgb; N],
    output: [Rgb; N],
    len: usize,
    brightness: Brightness,
}

impl<D: LedDriver, const N: usize> FrameBuffer<D, N> {
    /// Create a buffer addressing `len` pixels (at most `N`)
    pub fn new(driver: D, len: usize) -> Self {
        Self {
            driver,
            pixels: [Rgb::default(); N],
            output: [Rgb::default(); N],
            len: len.min(N),
            brightness: Brightness::FULL,
        }
    }

    /// Unscaled pixel values
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: LedDriver, const N: usize> FrameSink for FrameBuffer<D, N> {
    fn len(&self) -> usize {
        self.len
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels[..self.len].get_mut(index) {
            *pixel = color;
        }
    }

    fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    fn show(&mut self) {
        let scale = self.brightness.to_scale8();
        let len = self.len;
        for (out, pixel) in self.output[..len].iter_mut().zip(&self.pixels[..len]) {
            *out = scale_rgb(*pixel, scale);
        }
        self.driver.write(&self.output[..len]);
    }
}
