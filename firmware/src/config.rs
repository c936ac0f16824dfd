//! Board and profile configuration
//!
//! The control profile is picked at build time with the `palette`, `animator`
//! or `dimmer` feature. Without a profile feature the animator is built.

use twintail_composer::{
    AnimationMode, ControlsSnapshot, RenderConfig, StripGeometry,
    color::{BLUE, RED},
    engine::DEFAULT_FRAME_PERIOD,
    geometry::HARDWARE_GAP,
};
use twintail_remote::{ButtonMap, buttons};

#[cfg(any(
    all(feature = "palette", feature = "animator"),
    all(feature = "palette", feature = "dimmer"),
    all(feature = "animator", feature = "dimmer"),
))]
compile_error!("enable at most one of the `palette`, `animator` and `dimmer` features");

/// Everything that differs between the shipped control profiles
pub struct ControlProfile {
    pub name: &'static str,
    pub buttons: &'static ButtonMap,
    pub initial: ControlsSnapshot,
    pub render: RenderConfig,
    /// Sample the fuel gauge and publish battery and speed
    pub telemetry: bool,
}

pub struct BleConfig {
    pub name: &'static str,
    pub address: [u8; 6],
}

const fn geometry(skip: usize, loop_length: usize) -> StripGeometry {
    match StripGeometry::new(skip, HARDWARE_GAP, loop_length) {
        Ok(geometry) => geometry,
        Err(_) => panic!("strip loop must not be empty"),
    }
}

pub const LEFT_STRIP: StripGeometry = geometry(7, 146);
pub const RIGHT_STRIP: StripGeometry = geometry(3, 146);

/// Pixel capacity of each strip's frame buffer
pub const LED_BUFFER_LEN: usize = 154;

const _: () = assert!(LEFT_STRIP.buffer_len() <= LED_BUFFER_LEN);
const _: () = assert!(RIGHT_STRIP.buffer_len() <= LED_BUFFER_LEN);

pub const BLE: BleConfig = BleConfig {
    name: "Twintails",
    address: [0xff, 0x8f, 0x1a, 0x05, 0xe4, 0xc7],
};

#[cfg(feature = "palette")]
pub const PROFILE: ControlProfile = ControlProfile {
    name: "palette",
    buttons: &buttons::PALETTE,
    initial: ControlsSnapshot::initial(AnimationMode::Revolve, BLUE),
    render: RenderConfig {
        frame_period: Some(DEFAULT_FRAME_PERIOD),
        revolve_divisor: 1,
    },
    telemetry: false,
};
#[cfg(feature = "dimmer")]
pub const PROFILE: ControlProfile = ControlProfile {
    name: "dimmer",
    buttons: &buttons::DIMMER,
    initial: ControlsSnapshot::initial(AnimationMode::Solid, BLUE),
    render: RenderConfig {
        frame_period: Some(DEFAULT_FRAME_PERIOD),
        revolve_divisor: 1,
    },
    telemetry: false,
};
#[cfg(not(any(feature = "palette", feature = "dimmer")))]
pub const PROFILE: ControlProfile = ControlProfile {
    name: "animator",
    buttons: &buttons::ANIMATIONS,
    initial: ControlsSnapshot::initial(AnimationMode::Revolve, RED),
    render: RenderConfig {
        frame_period: None,
        revolve_divisor: twintail_composer::REVOLVE_COUNTER_DIVISOR,
    },
    telemetry: true,
};

#[macro_export]
macro_rules! left_led_gpio {
    ($p:expr) => {
        $p.GPIO25
    };
}

#[macro_export]
macro_rules! right_led_gpio {
    ($p:expr) => {
        $p.GPIO26
    };
}

#[macro_export]
macro_rules! fuel_gauge_sda_gpio {
    ($p:expr) => {
        $p.GPIO21
    };
}

#[macro_export]
macro_rules! fuel_gauge_scl_gpio {
    ($p:expr) => {
        $p.GPIO22
    };
}
