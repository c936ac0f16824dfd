//! Peer link abstraction
//!
//! The wireless transport is an external collaborator. The supervisor only
//! needs to start advertising, observe the connection and pull bytes.

use embedded_io::ReadReady;
use embedded_io_async::Read;

/// Passive values published to the connected peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Telemetry {
    pub battery_percent: Option<u8>,
    pub speed: u8,
}

/// Inbound half of a duplex byte stream plus connection control
pub trait PeerLink: Read + ReadReady {
    /// Start advertising so a peer can connect
    fn advertise(&mut self) -> Result<(), Self::Error>;

    fn is_connected(&self) -> bool;

    /// Non-blocking check for buffered inbound bytes
    fn bytes_available(&mut self) -> bool {
        self.read_ready().unwrap_or(false)
    }

    /// Update the passive characteristics read by the peer
    fn publish(&mut self, telemetry: &Telemetry);
}
