//! Integration tests for reading events from an async byte stream.

use std::collections::VecDeque;

use embassy_futures::block_on;
use embedded_io::{ErrorKind, ErrorType, ReadReady};
use embedded_io_async::Read;
use smart_leds::RGB8;
use twintail_bluefruit::{
    Button, ControlEvent, PacketReader, ReadError,
    packet::{encode_button, encode_color},
};

/// What the stream does once its buffered bytes are drained
#[derive(Default, Clone, Copy)]
enum OnDrain {
    /// A real link would park the reader here
    #[default]
    Block,
    Eof,
    Fail,
}

#[derive(Default)]
struct MockStream {
    inbound: VecDeque<u8>,
    on_drain: OnDrain,
}

impl MockStream {
    fn with(bytes: &[u8], on_drain: OnDrain) -> Self {
        Self {
            inbound: bytes.iter().copied().collect(),
            on_drain,
        }
    }
}

impl ErrorType for MockStream {
    type Error = ErrorKind;
}

impl Read for MockStream {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut count = 0;
        while count < buf.len() {
            let Some(byte) = self.inbound.pop_front() else {
                break;
            };
            buf[count] = byte;
            count += 1;
        }
        if count > 0 {
            return Ok(count);
        }
        match self.on_drain {
            OnDrain::Block => panic!("read would block forever"),
            OnDrain::Eof => Ok(0),
            OnDrain::Fail => Err(ErrorKind::NotConnected),
        }
    }
}

impl ReadReady for MockStream {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.inbound.is_empty())
    }
}

#[test]
fn idle_and_empty_returns_immediately() {
    let mut stream = MockStream::default();
    let mut reader = PacketReader::new();
    assert_eq!(block_on(reader.read_event(&mut stream)), Ok(None));
}

#[test]
fn reads_one_event_per_call() {
    let mut bytes = encode_button(Button::Up, true).to_vec();
    bytes.extend_from_slice(&encode_button(Button::Up, false));
    bytes.extend_from_slice(&encode_color(RGB8::new(0, 255, 126)));
    let mut stream = MockStream::with(&bytes, OnDrain::Block);
    let mut reader = PacketReader::new();

    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Ok(Some(ControlEvent::ButtonPress(Button::Up)))
    );
    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Ok(Some(ControlEvent::ButtonRelease(Button::Up)))
    );
    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Ok(Some(ControlEvent::ColorSelect(RGB8::new(0, 255, 126))))
    );
    assert_eq!(block_on(reader.read_event(&mut stream)), Ok(None));
}

#[test]
fn unknown_tag_is_discarded_and_next_packet_decodes() {
    let mut bytes = b"!Z".to_vec();
    bytes.extend_from_slice(&encode_button(Button::Right, true));
    let mut stream = MockStream::with(&bytes, OnDrain::Block);
    let mut reader = PacketReader::new();

    assert_eq!(block_on(reader.read_event(&mut stream)), Ok(None));
    assert!(reader.is_idle());
    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Ok(Some(ControlEvent::ButtonPress(Button::Right)))
    );
}

#[test]
fn eof_mid_packet_resets_parser() {
    let packet = encode_button(Button::Down, true);
    let mut stream = MockStream::with(&packet[..2], OnDrain::Eof);
    let mut reader = PacketReader::new();

    assert_eq!(block_on(reader.read_event(&mut stream)), Err(ReadError::Eof));
    assert!(reader.is_idle());

    let mut stream = MockStream::with(&packet, OnDrain::Block);
    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Ok(Some(ControlEvent::ButtonPress(Button::Down)))
    );
}

#[test]
fn stream_error_mid_packet_resets_parser() {
    let packet = encode_button(Button::One, true);
    let mut stream = MockStream::with(&packet[..3], OnDrain::Fail);
    let mut reader = PacketReader::new();

    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Err(ReadError::Io(ErrorKind::NotConnected))
    );
    assert!(reader.is_idle());
}

#[test]
fn packet_split_across_reads_is_decoded() {
    let packet = encode_color(RGB8::new(9, 8, 7));
    let mut stream = MockStream::with(&packet, OnDrain::Block);
    let mut reader = PacketReader::new();

    assert_eq!(
        block_on(reader.read_event(&mut stream)),
        Ok(Some(ControlEvent::ColorSelect(RGB8::new(9, 8, 7))))
    );
    assert!(stream.inbound.is_empty());
}
