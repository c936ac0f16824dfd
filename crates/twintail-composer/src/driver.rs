//! LED Driver abstraction layer
//!
//! Provides a trait-based abstraction for LED strip drivers,
//! allowing the render loop to be hardware-agnostic.

use crate::color::Rgb;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Colors arrive with brightness already applied.
pub trait LedDriver {
    /// Write colors to the LED strip, starting at the first physical pixel
    fn write(&mut self, colors: &[Rgb]);
}
