use crate::color::Rgb;

use super::{Animation, Frame};

/// Every pixel shows the current color
#[derive(Debug, Clone, Copy, Default)]
pub struct Solid;

impl Animation for Solid {
    fn pixel(&self, _index: usize, frame: &Frame) -> Option<Rgb> {
        Some(frame.color)
    }
}
