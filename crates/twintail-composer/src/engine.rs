//! Render loop - drives every loop from the shared controls
//!
//! Each frame the render loop:
//! - Reads a snapshot of the shared controls
//! - Pushes brightness to every sink
//! - Renders the current mode into every strip
//! - Flushes every strip
//! - Advances the frame counter by the current speed
//!
//! It is the only writer of the frame counter and never writes any other field.

use embassy_futures::yield_now;
use embassy_time::{Duration, Instant, Timer};
use log::debug;

use crate::{
    animation::{AnimationMode, Animations, Frame, REVOLVE_COUNTER_DIVISOR},
    controls::SharedControls,
    geometry::{GeometryError, StripGeometry},
    sink::FrameSink,
};

/// Frame period of the fixed-cadence profiles
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(100);

/// One physical loop and the sink that drives it
pub struct Strip<S: FrameSink> {
    geometry: StripGeometry,
    sink: S,
}

impl<S: FrameSink> Strip<S> {
    /// Attach a geometry to a sink large enough to hold it
    pub fn new(geometry: StripGeometry, sink: S) -> Result<Self, GeometryError> {
        geometry.check_fits(sink.len())?;
        Ok(Self { geometry, sink })
    }

    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Render loop pacing and animation tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// `None` renders as fast as the executor allows, yielding between frames
    pub frame_period: Option<Duration>,
    pub revolve_divisor: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_period: None,
            revolve_divisor: REVOLVE_COUNTER_DIVISOR,
        }
    }
}

/// Render loop over `STRIPS` loops sharing one set of controls
pub struct RenderLoop<'a, S: FrameSink, const STRIPS: usize> {
    controls: &'a SharedControls,
    strips: [Strip<S>; STRIPS],
    animations: Animations,
    frame_period: Option<Duration>,
    /// Counter modulus, 0 when it does not fit the counter
    counter_period: u32,
    last_mode: Option<AnimationMode>,
}

impl<'a, S: FrameSink, const STRIPS: usize> RenderLoop<'a, S, STRIPS> {
    pub fn new(controls: &'a SharedControls, strips: [Strip<S>; STRIPS], config: RenderConfig) -> Self {
        let animations = Animations::new(config.revolve_divisor);
        let counter_period = counter_period(&animations, &strips);
        Self {
            controls,
            strips,
            animations,
            frame_period: config.frame_period,
            counter_period,
            last_mode: None,
        }
    }

    pub fn strips(&self) -> &[Strip<S>; STRIPS] {
        &self.strips
    }

    /// Render and flush one frame without waiting
    pub fn render_frame(&mut self) {
        let snapshot = self.controls.snapshot();
        let counter = self.controls.frame_counter();

        if self.last_mode != Some(snapshot.mode) {
            debug!("render: mode {}", snapshot.mode.as_str());
            self.last_mode = Some(snapshot.mode);
        }

        for strip in &mut self.strips {
            strip.sink.set_brightness(snapshot.brightness);
        }

        for strip in &mut self.strips {
            let frame = Frame::new(snapshot.color, counter, strip.geometry.loop_length());
            self.animations
                .render(snapshot.mode, &frame, &strip.geometry, &mut strip.sink);
        }

        for strip in &mut self.strips {
            strip.sink.show();
        }

        self.controls
            .advance_frame_counter_within(u32::from(snapshot.speed.get()), self.counter_period);
    }

    /// Process one frame
    ///
    /// Renders, then waits out the rest of the frame period or yields.
    pub async fn tick(&mut self) {
        match self.frame_period {
            Some(period) => {
                let frame_start = Instant::now();
                self.render_frame();
                let render_time = frame_start.elapsed();
                if render_time < period {
                    Timer::after(period - render_time).await;
                }
            }
            None => {
                self.render_frame();
                yield_now().await;
            }
        }
    }

    /// Run the render loop indefinitely
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick().await;
        }
    }
}

/// Least common multiple of every strip's counter period, 0 if it exceeds `u32`
fn counter_period<S: FrameSink, const STRIPS: usize>(
    animations: &Animations,
    strips: &[Strip<S>; STRIPS],
) -> u32 {
    let mut period: u64 = 1;
    for strip in strips {
        let strip_period = animations.counter_period(strip.geometry.loop_length());
        period = period / gcd(period, strip_period) * strip_period;
        if period > u64::from(u32::MAX) {
            return 0;
        }
    }
    u32::try_from(period).unwrap_or(0)
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
