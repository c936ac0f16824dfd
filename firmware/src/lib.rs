#![no_std]

//! Twintail accessory firmware
//!
//! Board configuration plus the ESP32 drivers and embassy tasks that run the
//! composer and the remote control plane.

pub mod config;
pub mod infrastructure;

/// Move a value into a `'static` cell, for use inside `main`
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        CELL.init($val)
    }};
}
