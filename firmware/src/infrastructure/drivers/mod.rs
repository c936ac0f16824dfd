mod ble;
mod fuel_gauge;
mod led_ws2812;

pub use ble::{AccessoryServer, BleLinkError, BlePeerLink, run_host};
pub use fuel_gauge::{Max17048, Max17048Error};
pub use led_ws2812::{EspLedDriver, init_led_drivers};
