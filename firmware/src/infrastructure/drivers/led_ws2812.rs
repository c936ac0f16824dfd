use static_cell::make_static;

use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use smart_leds::SmartLedsWrite;

use twintail_composer::{LedDriver, Rgb};

use crate::config::LED_BUFFER_LEN;

/// ESP-specific LED driver using one RMT channel
///
/// The RMT (Remote Control) peripheral generates the precise timing
/// signals required by WS2812B LEDs.
pub struct EspLedDriver<'a> {
    adapter: SmartLedsAdapter<'a, { buffer_size(LED_BUFFER_LEN) }>,
}

/// Create the drivers for the left and right loops
///
/// Both loops share the RMT peripheral on separate channels.
pub fn init_led_drivers<L, R>(
    rmt: RMT<'static>,
    left_pin: L,
    right_pin: R,
) -> (EspLedDriver<'static>, EspLedDriver<'static>)
where
    L: PeripheralOutput<'static>,
    R: PeripheralOutput<'static>,
{
    let rmt = Rmt::new(rmt, Rate::from_mhz(80)).expect("RMT init failed");

    let left_buffer = make_static!(smart_led_buffer!(LED_BUFFER_LEN));
    let right_buffer = make_static!(smart_led_buffer!(LED_BUFFER_LEN));

    let left = EspLedDriver {
        adapter: SmartLedsAdapter::new(rmt.channel0, left_pin, left_buffer),
    };
    let right = EspLedDriver {
        adapter: SmartLedsAdapter::new(rmt.channel1, right_pin, right_buffer),
    };
    (left, right)
}

impl LedDriver for EspLedDriver<'static> {
    fn write(&mut self, colors: &[Rgb]) {
        interrupt::free(|| {
            let _ = self.adapter.write(colors.iter().copied());
        });
    }
}
