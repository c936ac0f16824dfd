#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;

use bt_hci::controller::ExternalController;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    i2c::master::{Config as I2cConfig, I2c},
    timer::timg::TimerGroup,
};
use esp_println::println;
use esp_radio::ble::controller::BleConnector;
use log::info;

use twintail_accessory::config::PROFILE;
use twintail_accessory::infrastructure::drivers::{Max17048, init_led_drivers};
use twintail_accessory::infrastructure::tasks::{ble_host_task, link_task, render_task};
use twintail_accessory::infrastructure::types::BleController;
use twintail_accessory::{
    fuel_gauge_scl_gpio, fuel_gauge_sda_gpio, left_led_gpio, mk_static, right_led_gpio,
};
use twintail_composer::SharedControls;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // The BLE stack needs heap (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    println!("twintail accessory, {} profile", PROFILE.name);

    let controls = &*mk_static!(SharedControls, SharedControls::new(PROFILE.initial));

    // Both loops render from the same controls
    let (left, right) = init_led_drivers(
        peripherals.RMT,
        left_led_gpio!(peripherals),
        right_led_gpio!(peripherals),
    );
    spawner.spawn(render_task(controls, left, right)).ok();

    // Bring up the radio and hand the controller to the BLE host
    let radio = &*mk_static!(
        esp_radio::Controller<'static>,
        esp_radio::init().expect("failed to init esp-radio")
    );
    let connector = BleConnector::new(radio, peripherals.BT, Default::default())
        .expect("failed to init BLE connector");
    let controller: BleController = ExternalController::new(connector);
    spawner.spawn(ble_host_task(controller)).ok();

    let gauge = if PROFILE.telemetry {
        let i2c = I2c::new(peripherals.I2C0, I2cConfig::default())
            .expect("I2C init failed")
            .with_sda(fuel_gauge_sda_gpio!(peripherals))
            .with_scl(fuel_gauge_scl_gpio!(peripherals))
            .into_async();
        Some(Max17048::new(i2c))
    } else {
        None
    };
    spawner.spawn(link_task(controls, gauge)).ok();

    info!("accessory started");
    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
