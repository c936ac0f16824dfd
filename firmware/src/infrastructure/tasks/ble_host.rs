use crate::infrastructure::drivers::run_host;
use crate::infrastructure::types::BleController;

#[embassy_executor::task]
pub async fn ble_host_task(controller: BleController) {
    run_host(controller).await;
}
