//! Strip geometry
//!
//! A physical loop is wired as `skip` opaque leading pixels, then `gap` pixels
//! of hardware offset, then `loop_length` pixels that take part in animation.
//! Only the last segment is ever written by the animation engine.

use core::fmt;

/// Hardware offset used by every deployed loop
pub const HARDWARE_GAP: usize = 1;

/// Physical layout of one LED loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripGeometry {
    skip: usize,
    gap: usize,
    loop_length: usize,
}

/// Geometry construction and attachment errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The loop has no animated pixels
    EmptyLoop,
    /// The sink cannot address every pixel of the loop
    BufferTooShort { required: usize, available: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLoop => write!(f, "loop length must be non-zero"),
            Self::BufferTooShort {
                required,
                available,
            } => write!(
                f,
                "sink holds {} pixels, geometry needs {}",
                available, required
            ),
        }
    }
}

impl StripGeometry {
    pub const fn new(skip: usize, gap: usize, loop_length: usize) -> Result<Self, GeometryError> {
        if loop_length == 0 {
            return Err(GeometryError::EmptyLoop);
        }
        Ok(Self {
            skip,
            gap,
            loop_length,
        })
    }

    pub const fn skip(&self) -> usize {
        self.skip
    }

    pub const fn gap(&self) -> usize {
        self.gap
    }

    pub const fn loop_length(&self) -> usize {
        self.loop_length
    }

    /// Absolute index of the first animated pixel
    pub const fn start(&self) -> usize {
        self.skip + self.gap
    }

    /// Number of addressable pixels the sink must hold
    pub const fn buffer_len(&self) -> usize {
        self.start() + self.loop_length
    }

    /// Check that a sink of `available` pixels can hold this loop
    pub const fn check_fits(&self, available: usize) -> Result<(), GeometryError> {
        let required = self.buffer_len();
        if available < required {
            return Err(GeometryError::BufferTooShort {
                required,
                available,
            });
        }
        Ok(())
    }
}
