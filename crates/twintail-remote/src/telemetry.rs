//! Battery telemetry
//!
//! Fuel gauges are slow and noisy, so readings are throttled and cached.

use core::{convert::Infallible, fmt::Debug};

use embassy_time::{Duration, Instant};
use log::{debug, warn};

/// Minimum time between two gauge reads
pub const BATTERY_CHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Time the gauge needs after power-up before its first reading is useful
pub const BATTERY_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Battery state-of-charge source
#[allow(async_fn_in_trait)]
pub trait FuelGauge {
    type Error: Debug;

    /// State of charge in whole percent
    async fn battery_percent(&mut self) -> Result<u8, Self::Error>;
}

/// Placeholder gauge for profiles without telemetry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFuelGauge;

impl FuelGauge for NoFuelGauge {
    type Error = Infallible;

    async fn battery_percent(&mut self) -> Result<u8, Self::Error> {
        Ok(0)
    }
}

/// Throttled, cached fuel gauge reader
pub struct BatterySampler<G: FuelGauge> {
    gauge: G,
    interval: Duration,
    next_due: Instant,
    cached: u8,
}

impl<G: FuelGauge> BatterySampler<G> {
    /// First read becomes due one settle delay after `now`
    pub fn new(gauge: G, now: Instant) -> Self {
        Self {
            gauge,
            interval: BATTERY_CHECK_INTERVAL,
            next_due: now + BATTERY_SETTLE_DELAY,
            cached: 0,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Last successful reading, 0 before the first one
    pub fn cached(&self) -> u8 {
        self.cached
    }

    pub fn gauge(&self) -> &G {
        &self.gauge
    }

    pub fn gauge_mut(&mut self) -> &mut G {
        &mut self.gauge
    }

    /// Return the battery percentage, reading the gauge only when a read is due
    pub async fn sample(&mut self, now: Instant) -> u8 {
        if now <= self.next_due {
            return self.cached;
        }
        match self.gauge.battery_percent().await {
            Ok(percent) => {
                self.cached = percent.min(100);
                debug!("telemetry: battery {}%", self.cached);
            }
            Err(err) => warn!("telemetry: fuel gauge read failed: {:?}", err),
        }
        self.next_due = now + self.interval;
        self.cached
    }
}
