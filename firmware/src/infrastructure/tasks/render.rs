use log::{error, info};
use twintail_composer::{FrameBuffer, RenderLoop, SharedControls, Strip};

use crate::config::{LEFT_STRIP, PROFILE, RIGHT_STRIP};
use crate::infrastructure::types::{LedDriver, StripBuffer};

/// Task for rendering both hair loops from the shared controls
#[embassy_executor::task]
pub async fn render_task(controls: &'static SharedControls, left: LedDriver, right: LedDriver) {
    let left = Strip::new(LEFT_STRIP, StripBuffer::new(left, LEFT_STRIP.buffer_len()));
    let right = Strip::new(RIGHT_STRIP, FrameBuffer::new(right, RIGHT_STRIP.buffer_len()));

    let strips = match (left, right) {
        (Ok(left), Ok(right)) => [left, right],
        (Err(err), _) | (_, Err(err)) => {
            error!("render: invalid strip geometry: {}", err);
            return;
        }
    };

    info!("render: starting with {} profile", PROFILE.name);
    RenderLoop::new(controls, strips, PROFILE.render).run().await
}
