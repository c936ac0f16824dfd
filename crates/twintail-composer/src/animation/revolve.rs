//! Revolving half-loop
//!
//! Half of the loop is lit with the current color and the other half is dark.
//! The lit window advances one pixel every `divisor` counter ticks.

use crate::color::{BLACK, Rgb};

use super::{Animation, Frame, REVOLVE_COUNTER_DIVISOR};

#[derive(Debug, Clone, Copy)]
pub struct Revolve {
    divisor: u32,
}

impl Revolve {
    /// A divisor of 0 is treated as 1
    pub const fn new(divisor: u32) -> Self {
        Self {
            divisor: if divisor == 0 { 1 } else { divisor },
        }
    }

    pub const fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Counter ticks after which the window returns to its start
    pub const fn period(&self, loop_length: usize) -> u64 {
        self.divisor as u64 * loop_length as u64
    }

    /// First lit pixel of the window
    pub fn position(&self, frame: &Frame) -> usize {
        if frame.loop_length == 0 {
            return 0;
        }
        (frame.counter / self.divisor) as usize % frame.loop_length
    }

    pub fn is_lit(&self, index: usize, frame: &Frame) -> bool {
        let len = frame.loop_length;
        if len == 0 {
            return false;
        }
        let distance = (index % len + len - self.position(frame)) % len;
        distance < len / 2
    }
}

impl Default for Revolve {
    fn default() -> Self {
        Self::new(REVOLVE_COUNTER_DIVISOR)
    }
}

impl Animation for Revolve {
    fn pixel(&self, index: usize, frame: &Frame) -> Option<Rgb> {
        if frame.loop_length == 0 {
            return None;
        }
        Some(if self.is_lit(index, frame) {
            frame.color
        } else {
            BLACK
        })
    }
}
