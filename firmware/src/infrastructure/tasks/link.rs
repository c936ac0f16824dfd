use embassy_time::Instant;
use twintail_composer::SharedControls;
use twintail_remote::{BatterySampler, LinkSupervisor};

use crate::config::PROFILE;
use crate::infrastructure::drivers::BlePeerLink;
use crate::infrastructure::types::BatteryGauge;

/// Task for supervising the peer link and applying its commands
///
/// Battery telemetry is published only when a gauge is passed in.
#[embassy_executor::task]
pub async fn link_task(controls: &'static SharedControls, gauge: Option<BatteryGauge>) {
    let mut supervisor = LinkSupervisor::new(BlePeerLink, controls, PROFILE.buttons);
    match gauge {
        Some(gauge) => {
            let mut supervisor =
                supervisor.with_telemetry(BatterySampler::new(gauge, Instant::now()));
            supervisor.run().await
        }
        None => supervisor.run().await,
    }
}
