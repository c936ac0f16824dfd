//! Shared control state
//!
//! The single record both tasks share. The link supervisor writes mode, color,
//! brightness and speed. The render loop writes the frame counter. Both read
//! everything.
//!
//! # Consistency
//!
//! No lock guards the record. Every field is its own atomic with `Relaxed`
//! ordering, so a single field is never observed half-written, but a reader
//! may see fields from two different writes (a new color with the old mode,
//! for example). That costs at most one transiently inconsistent frame and is
//! accepted. The color is packed into one word and is never torn.
//!
//! The render loop advances the frame counter modulo a common multiple of its
//! strips' animation periods, so the counter wraps without a visible jump.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::{
    animation::AnimationMode,
    color::{Rgb, rgb_from_u32, rgb_to_u32},
};

/// Brightness step for a single Up/Down press, in percent
pub const BRIGHTNESS_STEP: i8 = 20;

/// Global output brightness, stored as a whole percentage
///
/// Keeping the value integral makes repeated 20 % steps land exactly on
/// 0 and 100 instead of drifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Self = Self(0);
    pub const FULL: Self = Self(100);
    pub const INITIAL: Self = Self(80);

    /// Create a brightness from a percentage, clamped to 100
    pub const fn from_percent(percent: u8) -> Self {
        if percent > 100 {
            Self::FULL
        } else {
            Self(percent)
        }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Brightness in `0.0..=1.0`
    pub fn as_fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Brightness as an 8-bit scale factor, rounded to nearest
    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
    pub const fn to_scale8(self) -> u8 {
        ((self.0 as u16 * 255 + 50) / 100) as u8
    }

    /// Add a signed number of percent, clamping to `0..=100`
    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn step(self, delta: i8) -> Self {
        let value = self.0 as i16 + delta as i16;
        if value <= 0 {
            Self::OFF
        } else if value >= 100 {
            Self::FULL
        } else {
            Self(value as u8)
        }
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Animation speed multiplier, clamped to `1..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(4);

    pub const fn new(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    #[allow(clippy::cast_lossless, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn step(self, delta: i8) -> Self {
        let value = self.0 as i16 + delta as i16;
        if value <= Self::MIN.0 as i16 {
            Self::MIN
        } else if value >= Self::MAX.0 as i16 {
            Self::MAX
        } else {
            Self(value as u8)
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::MIN
    }
}

/// Value copy of the behavioural control fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsSnapshot {
    pub mode: AnimationMode,
    pub color: Rgb,
    pub brightness: Brightness,
    pub speed: Speed,
}

impl ControlsSnapshot {
    /// Documented power-on values for the given mode and color
    pub const fn initial(mode: AnimationMode, color: Rgb) -> Self {
        Self {
            mode,
            color,
            brightness: Brightness::INITIAL,
            speed: Speed::MIN,
        }
    }
}

/// Lock-free control record shared by the link supervisor and the render loop
pub struct SharedControls {
    mode: AtomicU8,
    /// Packed 0xRRGGBB
    color: AtomicU32,
    brightness: AtomicU8,
    speed: AtomicU8,
    frame_counter: AtomicU32,
}

impl SharedControls {
    pub const fn new(initial: ControlsSnapshot) -> Self {
        Self {
            mode: AtomicU8::new(initial.mode as u8),
            color: AtomicU32::new(rgb_to_u32(initial.color)),
            brightness: AtomicU8::new(initial.brightness.percent()),
            speed: AtomicU8::new(initial.speed.get()),
            frame_counter: AtomicU32::new(0),
        }
    }

    // === Read methods ===

    pub fn mode(&self) -> AnimationMode {
        AnimationMode::from_raw(self.mode.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn color(&self) -> Rgb {
        rgb_from_u32(self.color.load(Ordering::Relaxed))
    }

    pub fn brightness(&self) -> Brightness {
        Brightness::from_percent(self.brightness.load(Ordering::Relaxed))
    }

    pub fn speed(&self) -> Speed {
        Speed::new(self.speed.load(Ordering::Relaxed))
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter.load(Ordering::Relaxed)
    }

    /// Read every behavioural field
    ///
    /// Fields are loaded one by one, see the module docs.
    pub fn snapshot(&self) -> ControlsSnapshot {
        ControlsSnapshot {
            mode: self.mode(),
            color: self.color(),
            brightness: self.brightness(),
            speed: self.speed(),
        }
    }

    // === Write methods ===

    pub fn set_mode(&self, mode: AnimationMode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    pub fn set_color(&self, color: Rgb) {
        self.color.store(rgb_to_u32(color), Ordering::Relaxed);
    }

    pub fn set_brightness(&self, brightness: Brightness) {
        self.brightness
            .store(brightness.percent(), Ordering::Relaxed);
    }

    pub fn set_speed(&self, speed: Speed) {
        self.speed.store(speed.get(), Ordering::Relaxed);
    }

    /// Step brightness by `delta` percent, returning the new value
    pub fn step_brightness(&self, delta: i8) -> Brightness {
        let step = |raw: u8| Brightness::from_percent(raw).step(delta);
        let previous = self
            .brightness
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |raw| {
                Some(step(raw).percent())
            });
        match previous {
            Ok(raw) | Err(raw) => step(raw),
        }
    }

    /// Step speed by `delta`, returning the new value
    pub fn step_speed(&self, delta: i8) -> Speed {
        let step = |raw: u8| Speed::new(raw).step(delta);
        let previous = self
            .speed
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |raw| {
                Some(step(raw).get())
            });
        match previous {
            Ok(raw) | Err(raw) => step(raw),
        }
    }

    /// Advance the frame counter by `step`, wrapping on overflow
    pub fn advance_frame_counter(&self, step: u32) -> u32 {
        self.frame_counter
            .fetch_add(step, Ordering::Relaxed)
            .wrapping_add(step)
    }

    /// Advance the frame counter by `step`, modulo `period`
    ///
    /// With `period` a common multiple of every animation's period the wrap
    /// is invisible. A `period` of 0 behaves like [`Self::advance_frame_counter`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance_frame_counter_within(&self, step: u32, period: u32) -> u32 {
        if period == 0 {
            return self.advance_frame_counter(step);
        }
        let next = |raw: u32| ((u64::from(raw) + u64::from(step)) % u64::from(period)) as u32;
        let previous = self
            .frame_counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |raw| Some(next(raw)));
        match previous {
            Ok(raw) | Err(raw) => next(raw),
        }
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new(ControlsSnapshot::initial(
            AnimationMode::default(),
            crate::color::RED,
        ))
    }
}
