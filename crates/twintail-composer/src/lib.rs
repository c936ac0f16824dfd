#![no_std]

//! Twintail composer - animation engine for looped LED strips
//!
//! Architecture layers:
//! - `driver` - Hardware abstraction ([`LedDriver`] trait)
//! - `sink` - Frame sink abstraction and the buffered [`FrameBuffer`]
//! - `geometry` - Physical layout of one loop ([`StripGeometry`])
//! - `animation` - Animation strategies and the [`AnimationMode`] enum
//! - `controls` - Shared control state ([`SharedControls`])
//! - `engine` - Render loop orchestrator
//!
//! The render loop is generic over `FrameSink`, allowing different hardware backends.

pub mod animation;
pub mod color;
pub mod controls;
pub mod driver;
pub mod engine;
pub mod geometry;
pub mod math8;
pub mod sink;

// Driver exports
pub use driver::LedDriver;

// Sink exports
pub use sink::{FrameBuffer, FrameSink};

// Geometry exports
pub use geometry::{GeometryError, StripGeometry};

// Animation exports
pub use animation::{AnimationMode, Animations, Frame, REVOLVE_COUNTER_DIVISOR};

// Controls exports
pub use controls::{Brightness, ControlsSnapshot, SharedControls, Speed};

// Engine exports
pub use engine::{RenderConfig, RenderLoop, Strip};

pub use color::Rgb;
