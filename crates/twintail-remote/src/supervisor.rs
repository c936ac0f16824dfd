//! Link supervisor - connection lifecycle state machine
//!
//! The supervisor alternates between advertising and serving one connected
//! peer. While connected it decodes at most one command per step and applies
//! it to the shared controls. Only the shared controls outlive a session, the
//! decoder's partial packet is dropped on disconnect.

use embassy_futures::yield_now;
use embassy_time::{Duration, Instant};
use log::{debug, info, warn};
use twintail_bluefruit::{ControlEvent, PacketReader, ReadError};
use twintail_composer::SharedControls;

use crate::{
    buttons::ButtonMap,
    link::{PeerLink, Telemetry},
    telemetry::{BatterySampler, FuelGauge, NoFuelGauge},
};

/// Delay before a failed `advertise` is attempted again
pub const ADVERTISE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Connection lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Advertising,
    Connected,
}

pub struct LinkSupervisor<'a, L: PeerLink, G: FuelGauge = NoFuelGauge> {
    link: L,
    controls: &'a SharedControls,
    buttons: &'a ButtonMap,
    reader: PacketReader,
    state: LinkState,
    advertising: bool,
    retry_at: Option<Instant>,
    retry_delay: Duration,
    telemetry: Option<BatterySampler<G>>,
}

impl<'a, L: PeerLink> LinkSupervisor<'a, L, NoFuelGauge> {
    pub fn new(link: L, controls: &'a SharedControls, buttons: &'a ButtonMap) -> Self {
        Self {
            link,
            controls,
            buttons,
            reader: PacketReader::new(),
            state: LinkState::Advertising,
            advertising: false,
            retry_at: None,
            retry_delay: ADVERTISE_RETRY_DELAY,
            telemetry: None,
        }
    }
}

impl<'a, L: PeerLink, G: FuelGauge> LinkSupervisor<'a, L, G> {
    /// Publish battery and speed on every connected step
    pub fn with_telemetry<T: FuelGauge>(self, sampler: BatterySampler<T>) -> LinkSupervisor<'a, L, T> {
        LinkSupervisor {
            link: self.link,
            controls: self.controls,
            buttons: self.buttons,
            reader: self.reader,
            state: self.state,
            advertising: self.advertising,
            retry_at: self.retry_at,
            retry_delay: self.retry_delay,
            telemetry: Some(sampler),
        }
    }

    /// Override the delay between failed advertise attempts
    #[must_use]
    pub fn with_advertise_retry(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Run one scheduling opportunity and return the resulting state
    pub async fn step(&mut self) -> LinkState {
        match self.state {
            LinkState::Advertising => self.poll_advertising(),
            LinkState::Connected => self.poll_connected().await,
        }
        self.state
    }

    /// Run the supervisor indefinitely
    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
            yield_now().await;
        }
    }

    /// Apply a decoded command to the shared controls
    pub fn apply(&self, event: ControlEvent) {
        match event {
            ControlEvent::ButtonPress(button) => {
                let action = self.buttons.action(button);
                debug!("link: button {} -> {:?}", button.as_str(), action);
                action.apply(self.controls);
            }
            ControlEvent::ButtonRelease(_) => {}
            ControlEvent::ColorSelect(color) => {
                debug!("link: color {:?}", color);
                self.controls.set_color(color);
            }
        }
    }

    fn poll_advertising(&mut self) {
        let retry_due = self.retry_at.is_none_or(|at| Instant::now() >= at);
        if !self.advertising && retry_due {
            match self.link.advertise() {
                Ok(()) => {
                    info!("link: advertising");
                    self.advertising = true;
                    self.retry_at = None;
                }
                Err(err) => {
                    warn!("link: failed to start advertising: {:?}", err);
                    self.retry_at = Some(Instant::now() + self.retry_delay);
                }
            }
        }

        if self.link.is_connected() {
            info!("link: peer connected");
            self.advertising = false;
            self.retry_at = None;
            self.state = LinkState::Connected;
        }
    }

    async fn poll_connected(&mut self) {
        if !self.link.is_connected() {
            info!("link: peer disconnected");
            self.reader.reset();
            self.state = LinkState::Advertising;
            return;
        }

        if let Some(sampler) = self.telemetry.as_mut() {
            let battery = sampler.sample(Instant::now()).await;
            self.link.publish(&Telemetry {
                battery_percent: Some(battery),
                speed: self.controls.speed().get(),
            });
        }

        if self.link.bytes_available() {
            match self.reader.read_event(&mut self.link).await {
                Ok(Some(event)) => self.apply(event),
                Ok(None) => {}
                Err(ReadError::Io(err)) => warn!("link: read failed: {:?}", err),
                Err(ReadError::Eof) => debug!("link: stream closed"),
            }
        }
    }
}
