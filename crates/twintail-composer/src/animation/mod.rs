//! Animation system with compile-time known modes
//!
//! Every mode is a small strategy implementing [`Animation`]. Strategies are
//! pure: the pixel value depends only on the index and the [`Frame`] inputs.
//! Brightness is never baked into pixel values, the sink applies it.

mod rainbow;
mod revolve;
mod solid;
mod wipe;

pub use rainbow::Rainbow;
pub use revolve::Revolve;
pub use solid::Solid;
pub use wipe::Wipe;

use crate::{color::Rgb, geometry::StripGeometry, sink::FrameSink};

/// Counter ticks per revolve step in the default profile
pub const REVOLVE_COUNTER_DIVISOR: u32 = 2;

const MODE_NAME_SOLID: &str = "solid";
const MODE_NAME_REVOLVE: &str = "revolve";
const MODE_NAME_WIPE: &str = "wipe";
const MODE_NAME_RAINBOW: &str = "rainbow";

const MODE_ID_SOLID: u8 = 1;
const MODE_ID_REVOLVE: u8 = 2;
const MODE_ID_WIPE: u8 = 3;
const MODE_ID_RAINBOW: u8 = 4;

/// Inputs of one rendered frame for one loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub color: Rgb,
    pub counter: u32,
    pub loop_length: usize,
}

impl Frame {
    pub const fn new(color: Rgb, counter: u32, loop_length: usize) -> Self {
        Self {
            color,
            counter,
            loop_length,
        }
    }
}

pub trait Animation {
    /// Color of loop-relative pixel `index`, or `None` to leave it untouched
    fn pixel(&self, index: usize, frame: &Frame) -> Option<Rgb>;
}

/// Known animation modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AnimationMode {
    #[default]
    Solid = MODE_ID_SOLID,
    Revolve = MODE_ID_REVOLVE,
    Wipe = MODE_ID_WIPE,
    Rainbow = MODE_ID_RAINBOW,
}

impl AnimationMode {
    pub const ALL: [Self; 4] = [Self::Solid, Self::Revolve, Self::Wipe, Self::Rainbow];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_SOLID => Self::Solid,
            MODE_ID_REVOLVE => Self::Revolve,
            MODE_ID_WIPE => Self::Wipe,
            MODE_ID_RAINBOW => Self::Rainbow,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => MODE_NAME_SOLID,
            Self::Revolve => MODE_NAME_REVOLVE,
            Self::Wipe => MODE_NAME_WIPE,
            Self::Rainbow => MODE_NAME_RAINBOW,
        }
    }
}

/// The strategy for every mode, with their tunables
#[derive(Debug, Clone, Copy)]
pub struct Animations {
    solid: Solid,
    revolve: Revolve,
    wipe: Wipe,
    rainbow: Rainbow,
}

impl Animations {
    pub const fn new(revolve_divisor: u32) -> Self {
        Self {
            solid: Solid,
            revolve: Revolve::new(revolve_divisor),
            wipe: Wipe,
            rainbow: Rainbow,
        }
    }

    /// Pixel value of `mode` for one loop-relative index
    pub fn pixel(&self, mode: AnimationMode, index: usize, frame: &Frame) -> Option<Rgb> {
        match mode {
            AnimationMode::Solid => self.solid.pixel(index, frame),
            AnimationMode::Revolve => self.revolve.pixel(index, frame),
            AnimationMode::Wipe => self.wipe.pixel(index, frame),
            AnimationMode::Rainbow => self.rainbow.pixel(index, frame),
        }
    }

    /// Counter ticks after which every mode renders the same frame again
    ///
    /// A common multiple of the rainbow and revolve periods for one loop.
    pub const fn counter_period(&self, loop_length: usize) -> u64 {
        Rainbow::period(loop_length) * self.revolve.divisor() as u64
    }

    /// Render one loop into `sink`, offsetting by the geometry start
    pub fn render<S: FrameSink>(
        &self,
        mode: AnimationMode,
        frame: &Frame,
        geometry: &StripGeometry,
        sink: &mut S,
    ) {
        match mode {
            AnimationMode::Solid => fill(&self.solid, frame, geometry, sink),
            AnimationMode::Revolve => fill(&self.revolve, frame, geometry, sink),
            AnimationMode::Wipe => fill(&self.wipe, frame, geometry, sink),
            AnimationMode::Rainbow => fill(&self.rainbow, frame, geometry, sink),
        }
    }
}

impl Default for Animations {
    fn default() -> Self {
        Self::new(REVOLVE_COUNTER_DIVISOR)
    }
}

fn fill<A: Animation, S: FrameSink>(
    animation: &A,
    frame: &Frame,
    geometry: &StripGeometry,
    sink: &mut S,
) {
    let start = geometry.start();
    for index in 0..geometry.loop_length() {
        if let Some(color) = animation.pixel(index, frame) {
            sink.set_pixel(start + index, color);
        }
    }
}
