#![no_std]

//! Remote control plane for the twintail accessory
//!
//! - `link` - Peer link abstraction over the wireless transport
//! - `buttons` - Button to action tables, one per control profile
//! - `telemetry` - Throttled fuel gauge sampling
//! - `supervisor` - Connection lifecycle state machine applying commands
//!   to the shared controls

pub mod buttons;
pub mod link;
pub mod supervisor;
pub mod telemetry;

pub use buttons::{ButtonAction, ButtonMap};
pub use link::{PeerLink, Telemetry};
pub use supervisor::{ADVERTISE_RETRY_DELAY, LinkState, LinkSupervisor};
pub use telemetry::{BatterySampler, FuelGauge, NoFuelGauge};
