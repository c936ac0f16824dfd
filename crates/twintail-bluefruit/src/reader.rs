//! Stream adapter for the packet parser

use core::fmt;

use embedded_io::ReadReady;
use embedded_io_async::Read;
use log::debug;

use crate::{packet::ControlEvent, parser::PacketParser};

/// Errors surfaced by [`PacketReader::read_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError<E> {
    /// The underlying stream failed
    Io(E),
    /// The stream reported end of data
    Eof,
}

impl<E: fmt::Debug> fmt::Display for ReadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "stream error: {:?}", err),
            Self::Eof => write!(f, "end of stream"),
        }
    }
}

/// Pulls bytes from a stream and decodes control events
///
/// Partial packets survive across calls, so a packet split over several
/// transport writes is still decoded.
#[derive(Debug, Clone, Default)]
pub struct PacketReader {
    parser: PacketParser,
}

impl PacketReader {
    pub const fn new() -> Self {
        Self {
            parser: PacketParser::new(),
        }
    }

    /// Forget any partial packet, used when the session ends
    pub fn reset(&mut self) {
        self.parser.reset();
    }

    pub fn is_idle(&self) -> bool {
        self.parser.is_idle()
    }

    /// Decode at most one event from `stream`
    ///
    /// Returns `Ok(None)` without awaiting when no packet is in progress and
    /// the stream has nothing buffered. Once a packet has started, waits for
    /// the rest of it. Packets that carry no command or fail to decode are
    /// discarded and also yield `Ok(None)`.
    pub async fn read_event<R>(&mut self, stream: &mut R) -> Result<Option<ControlEvent>, ReadError<R::Error>>
    where
        R: Read + ReadReady,
    {
        loop {
            if self.parser.is_idle() {
                match stream.read_ready() {
                    Ok(true) => {}
                    Ok(false) => return Ok(None),
                    Err(err) => return Err(ReadError::Io(err)),
                }
            }

            let mut byte = [0u8; 1];
            match stream.read(&mut byte).await {
                Ok(0) => {
                    self.parser.reset();
                    return Err(ReadError::Eof);
                }
                Ok(_) => {}
                Err(err) => {
                    self.parser.reset();
                    return Err(ReadError::Io(err));
                }
            }

            match self.parser.feed(byte[0]) {
                Ok(None) => {}
                Ok(Some(packet)) => {
                    let event = packet.to_event();
                    if event.is_none() {
                        debug!("bluefruit: skipped {:?} packet", packet);
                    }
                    return Ok(event);
                }
                Err(err) => {
                    debug!("bluefruit: discarded packet: {}", err);
                    return Ok(None);
                }
            }
        }
    }
}
