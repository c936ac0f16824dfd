use crate::color::{Rgb, colorwheel};

use super::{Animation, Frame};

/// Color wheel spread once around the loop, shifted by the counter
#[derive(Debug, Clone, Copy, Default)]
pub struct Rainbow;

impl Rainbow {
    /// Wheel position of loop-relative pixel `index`
    ///
    /// Periodic in `index` with period `loop_length`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn hue(index: usize, frame: &Frame) -> u8 {
        if frame.loop_length == 0 {
            return 0;
        }
        let len = frame.loop_length as u64;
        let position = (index as u64 % len) + u64::from(frame.counter);
        ((position * 255 / len) & 0xFF) as u8
    }

    /// Counter ticks after which every pixel's hue repeats
    pub const fn period(loop_length: usize) -> u64 {
        256 * loop_length as u64
    }
}

impl Animation for Rainbow {
    fn pixel(&self, index: usize, frame: &Frame) -> Option<Rgb> {
        Some(colorwheel(Self::hue(index, frame)))
    }
}
