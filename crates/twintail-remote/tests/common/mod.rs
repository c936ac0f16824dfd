//! Shared fakes for the supervisor tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_io::{ErrorKind, ErrorType, ReadReady};
use embedded_io_async::Read;
use twintail_remote::{FuelGauge, PeerLink, Telemetry};

/// Scripted peer link
///
/// Reading from an empty link ends the session, the way a real transport
/// interrupts a pending read on disconnect.
#[derive(Default)]
pub struct FakeLink {
    pub connected: bool,
    pub inbound: VecDeque<u8>,
    pub advertise_calls: usize,
    pub fail_advertise: bool,
    pub published: Vec<Telemetry>,
}

impl FakeLink {
    pub fn push(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }
}

impl ErrorType for FakeLink {
    type Error = ErrorKind;
}

impl Read for FakeLink {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.inbound.pop_front() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => {
                self.connected = false;
                Err(ErrorKind::NotConnected)
            }
        }
    }
}

impl ReadReady for FakeLink {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.inbound.is_empty())
    }
}

impl PeerLink for FakeLink {
    fn advertise(&mut self) -> Result<(), Self::Error> {
        self.advertise_calls += 1;
        if self.fail_advertise {
            return Err(ErrorKind::Other);
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, telemetry: &Telemetry) {
        self.published.push(*telemetry);
    }
}

/// Gauge returning a fixed reading and counting reads
pub struct FakeGauge {
    pub reading: Result<u8, ()>,
    pub reads: usize,
}

impl FakeGauge {
    pub fn new(reading: Result<u8, ()>) -> Self {
        Self { reading, reads: 0 }
    }
}

impl FuelGauge for FakeGauge {
    type Error = ();

    async fn battery_percent(&mut self) -> Result<u8, Self::Error> {
        self.reads += 1;
        self.reading
    }
}
