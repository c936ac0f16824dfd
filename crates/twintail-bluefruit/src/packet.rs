//! Packet types and wire constants

use core::fmt;

use smart_leds::RGB8;

use crate::button::Button;

/// Packet synchronization byte
pub const PACKET_START: u8 = b'!';

/// Longest packet on the wire (quaternion)
pub const MAX_PACKET_LEN: usize = 19;

const BUTTON_PRESSED: u8 = b'1';
const BUTTON_RELEASED: u8 = b'0';

/// Packet tags the app can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Button,
    Color,
    Accelerometer,
    Gyro,
    Magnetometer,
    Location,
    Quaternion,
}

impl PacketKind {
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            b'B' => Self::Button,
            b'C' => Self::Color,
            b'A' => Self::Accelerometer,
            b'G' => Self::Gyro,
            b'M' => Self::Magnetometer,
            b'L' => Self::Location,
            b'Q' => Self::Quaternion,
            _ => return None,
        })
    }

    pub const fn tag(self) -> u8 {
        match self {
            Self::Button => b'B',
            Self::Color => b'C',
            Self::Accelerometer => b'A',
            Self::Gyro => b'G',
            Self::Magnetometer => b'M',
            Self::Location => b'L',
            Self::Quaternion => b'Q',
        }
    }

    /// Total packet length including start, tag and checksum
    pub const fn packet_len(self) -> usize {
        match self {
            Self::Button => 5,
            Self::Color => 6,
            // 3 x f32
            Self::Accelerometer | Self::Gyro | Self::Magnetometer | Self::Location => 15,
            // 4 x f32
            Self::Quaternion => MAX_PACKET_LEN,
        }
    }
}

/// A decoded packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet {
    Button { button: Button, pressed: bool },
    Color(RGB8),
    /// Sensor streams are recognised so they can be skipped whole
    Sensor(PacketKind),
}

/// A command for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    ButtonPress(Button),
    ButtonRelease(Button),
    ColorSelect(RGB8),
}

impl Packet {
    /// Command carried by this packet, if any
    pub const fn to_event(self) -> Option<ControlEvent> {
        match self {
            Self::Button {
                button,
                pressed: true,
            } => Some(ControlEvent::ButtonPress(button)),
            Self::Button {
                button,
                pressed: false,
            } => Some(ControlEvent::ButtonRelease(button)),
            Self::Color(color) => Some(ControlEvent::ColorSelect(color)),
            Self::Sensor(_) => None,
        }
    }
}

/// Errors that can occur while decoding a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// Tag byte is not a known packet type
    UnknownType(u8),
    /// Checksum mismatch
    InvalidChecksum,
    /// Button id outside `'1'..='8'`
    InvalidButton(u8),
    /// Button state is neither `'1'` nor `'0'`
    InvalidButtonState(u8),
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(tag) => write!(f, "unknown packet type 0x{:02x}", tag),
            Self::InvalidChecksum => write!(f, "invalid checksum"),
            Self::InvalidButton(id) => write!(f, "invalid button id 0x{:02x}", id),
            Self::InvalidButtonState(state) => {
                write!(f, "invalid button state 0x{:02x}", state)
            }
        }
    }
}

/// Checksum of the bytes preceding the checksum byte
pub fn checksum(bytes: &[u8]) -> u8 {
    !bytes.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

pub(crate) const fn button_state(state: u8) -> Result<bool, PacketError> {
    match state {
        BUTTON_PRESSED => Ok(true),
        BUTTON_RELEASED => Ok(false),
        other => Err(PacketError::InvalidButtonState(other)),
    }
}

/// Encode a button packet
pub fn encode_button(button: Button, pressed: bool) -> [u8; 5] {
    let state = if pressed {
        BUTTON_PRESSED
    } else {
        BUTTON_RELEASED
    };
    let mut packet = [PACKET_START, b'B', button.to_wire(), state, 0];
    packet[4] = checksum(&packet[..4]);
    packet
}

/// Encode a color packet
pub fn encode_color(color: RGB8) -> [u8; 6] {
    let mut packet = [PACKET_START, b'C', color.r, color.g, color.b, 0];
    packet[5] = checksum(&packet[..5]);
    packet
}
