#![no_std]

//! Decoder for the Bluefruit LE Connect controller packets
//!
//! The companion app sends short checksummed packets over the UART service:
//!
//! - START (1 byte): `'!'`
//! - TYPE (1 byte): packet tag (`B` button, `C` color, sensor tags)
//! - BODY (fixed length per tag)
//! - CHECKSUM (1 byte): bitwise NOT of the byte sum of everything before it
//!
//! [`PacketParser`] is a byte-fed state machine, [`PacketReader`] pulls bytes
//! from an async stream and yields [`ControlEvent`]s. The decoder never maps
//! buttons to effects.

pub mod button;
pub mod packet;
pub mod parser;
pub mod reader;

pub use button::Button;
pub use packet::{ControlEvent, Packet, PacketError, PacketKind};
pub use parser::PacketParser;
pub use reader::{PacketReader, ReadError};
