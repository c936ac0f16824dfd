use bt_hci::controller::ExternalController;
use esp_hal::{Async, i2c::master::I2c};
use esp_radio::ble::controller::BleConnector;
use twintail_composer::FrameBuffer;

use crate::{
    config::LED_BUFFER_LEN,
    infrastructure::drivers::{EspLedDriver, Max17048},
};

pub type LedDriver = EspLedDriver<'static>;

pub type StripBuffer = FrameBuffer<LedDriver, LED_BUFFER_LEN>;

pub type BatteryGauge = Max17048<I2c<'static, Async>>;

/// HCI command slots of the BLE controller
pub const BLE_HCI_SLOTS: usize = 20;

pub type BleController = ExternalController<BleConnector<'static>, BLE_HCI_SLOTS>;
