use heapless::Vec;
use smart_leds::RGB8;

use crate::{
    button::Button,
    packet::{MAX_PACKET_LEN, PACKET_START, Packet, PacketError, PacketKind, button_state, checksum},
};

/// State machine for parsing incoming packets
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PACKET_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Got START, waiting for TYPE
    WaitingForType,
    /// Reading body and checksum of a known packet type
    ReadingBody(PacketKind),
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    pub const fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial packet
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
    }

    /// True when no packet is in progress
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::WaitingForStart
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(packet))` when a complete valid packet is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error. The
    /// parser is idle again after a packet or an error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == PACKET_START {
                    self.buffer.clear();
                    let _ = self.buffer.push(byte);
                    self.state = ParseState::WaitingForType;
                }
                // Silently ignore bytes between packets
                Ok(None)
            }
            ParseState::WaitingForType => {
                let Some(kind) = PacketKind::from_tag(byte) else {
                    self.reset();
                    return Err(PacketError::UnknownType(byte));
                };
                let _ = self.buffer.push(byte);
                self.state = ParseState::ReadingBody(kind);
                Ok(None)
            }
            ParseState::ReadingBody(kind) => {
                // Cannot overflow, every packet_len fits MAX_PACKET_LEN
                let _ = self.buffer.push(byte);
                if self.buffer.len() < kind.packet_len() {
                    return Ok(None);
                }
                let result = decode(kind, &self.buffer);
                self.reset();
                result.map(Some)
            }
        }
    }
}

fn decode(kind: PacketKind, bytes: &[u8]) -> Result<Packet, PacketError> {
    let Some((&expected, body)) = bytes.split_last() else {
        return Err(PacketError::InvalidChecksum);
    };
    if checksum(body) != expected {
        return Err(PacketError::InvalidChecksum);
    }

    match (kind, body) {
        (PacketKind::Button, &[_, _, id, state]) => {
            let button = Button::from_wire(id).ok_or(PacketError::InvalidButton(id))?;
            let pressed = button_state(state)?;
            Ok(Packet::Button { button, pressed })
        }
        (PacketKind::Color, &[_, _, r, g, b]) => Ok(Packet::Color(RGB8 { r, g, b })),
        (PacketKind::Button | PacketKind::Color, _) => Err(PacketError::InvalidChecksum),
        (sensor, _) => Ok(Packet::Sensor(sensor)),
    }
}
