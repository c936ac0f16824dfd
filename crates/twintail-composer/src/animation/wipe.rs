use crate::color::Rgb;

use super::{Animation, Frame};

/// Leaves the buffer as the previous mode left it
#[derive(Debug, Clone, Copy, Default)]
pub struct Wipe;

impl Animation for Wipe {
    fn pixel(&self, _index: usize, _frame: &Frame) -> Option<Rgb> {
        None
    }
}
