//! Integration tests for the byte-fed packet parser.

use proptest::prelude::*;
use smart_leds::RGB8;
use twintail_bluefruit::{
    Button, ControlEvent, Packet, PacketError, PacketKind, PacketParser,
    packet::{checksum, encode_button, encode_color},
};

fn feed_all(parser: &mut PacketParser, bytes: &[u8]) -> Vec<Result<Packet, PacketError>> {
    bytes
        .iter()
        .filter_map(|&byte| parser.feed(byte).transpose())
        .collect()
}

fn sensor_packet(tag: u8, len: usize) -> Vec<u8> {
    let mut packet = vec![b'!', tag];
    packet.resize(len - 1, 0x42);
    packet.push(checksum(&packet));
    packet
}

// -----------------------------------------------------------------------------
// Valid packets
// -----------------------------------------------------------------------------

#[test]
fn decodes_every_button() {
    let mut parser = PacketParser::new();
    for button in Button::ALL {
        for pressed in [true, false] {
            let results = feed_all(&mut parser, &encode_button(button, pressed));
            assert_eq!(results, vec![Ok(Packet::Button { button, pressed })]);
        }
    }
}

#[test]
fn decodes_app_literals() {
    let mut parser = PacketParser::new();
    let results = feed_all(&mut parser, b"!B516!B507");
    assert_eq!(
        results,
        vec![
            Ok(Packet::Button {
                button: Button::Up,
                pressed: true
            }),
            Ok(Packet::Button {
                button: Button::Up,
                pressed: false
            }),
        ]
    );
}

#[test]
fn decodes_color() {
    let teal = RGB8::new(0, 255, 126);
    let mut parser = PacketParser::new();
    let results = feed_all(&mut parser, &encode_color(teal));
    assert_eq!(results, vec![Ok(Packet::Color(teal))]);
    assert_eq!(
        Packet::Color(teal).to_event(),
        Some(ControlEvent::ColorSelect(teal))
    );
}

#[test]
fn sensor_packets_are_consumed_whole() {
    let mut parser = PacketParser::new();
    for kind in [
        PacketKind::Accelerometer,
        PacketKind::Gyro,
        PacketKind::Magnetometer,
        PacketKind::Location,
        PacketKind::Quaternion,
    ] {
        let mut bytes = sensor_packet(kind.tag(), kind.packet_len());
        bytes.extend_from_slice(&encode_button(Button::One, true));
        let results = feed_all(&mut parser, &bytes);
        assert_eq!(
            results,
            vec![
                Ok(Packet::Sensor(kind)),
                Ok(Packet::Button {
                    button: Button::One,
                    pressed: true
                }),
            ]
        );
        assert_eq!(Packet::Sensor(kind).to_event(), None);
    }
}

// -----------------------------------------------------------------------------
// Errors and resynchronisation
// -----------------------------------------------------------------------------

#[test]
fn skips_noise_between_packets() {
    let mut parser = PacketParser::new();
    let mut bytes = b"garbage\r\n".to_vec();
    bytes.extend_from_slice(&encode_button(Button::Two, true));
    let results = feed_all(&mut parser, &bytes);
    assert_eq!(results.len(), 1);
    assert!(parser.is_idle());
}

#[test]
fn unknown_type_then_valid_packet() {
    let mut parser = PacketParser::new();
    let mut bytes = b"!X123".to_vec();
    bytes.extend_from_slice(&encode_button(Button::Three, true));
    let results = feed_all(&mut parser, &bytes);
    assert_eq!(
        results,
        vec![
            Err(PacketError::UnknownType(b'X')),
            Ok(Packet::Button {
                button: Button::Three,
                pressed: true
            }),
        ]
    );
}

#[test]
fn bad_checksum_is_rejected() {
    let mut parser = PacketParser::new();
    let mut bytes = encode_color(RGB8::new(1, 2, 3));
    bytes[5] = bytes[5].wrapping_add(1);
    assert_eq!(feed_all(&mut parser, &bytes), vec![Err(PacketError::InvalidChecksum)]);
    assert!(parser.is_idle());
}

#[test]
fn malformed_button_is_rejected() {
    let mut parser = PacketParser::new();

    let mut bad_id = *b"!B91\0";
    bad_id[4] = checksum(&bad_id[..4]);
    assert_eq!(feed_all(&mut parser, &bad_id), vec![Err(PacketError::InvalidButton(b'9'))]);

    let mut bad_state = *b"!B12\0";
    bad_state[4] = checksum(&bad_state[..4]);
    assert_eq!(
        feed_all(&mut parser, &bad_state),
        vec![Err(PacketError::InvalidButtonState(b'2'))]
    );
}

#[test]
fn reset_drops_partial_packet() {
    let mut parser = PacketParser::new();
    let packet = encode_button(Button::Four, true);
    feed_all(&mut parser, &packet[..3]);
    assert!(!parser.is_idle());

    parser.reset();
    assert!(parser.is_idle());
    assert_eq!(feed_all(&mut parser, &packet[3..]), vec![]);
}

proptest! {
    #[test]
    fn recovers_after_arbitrary_noise(
        noise in proptest::collection::vec(any::<u8>().prop_filter("not a start byte", |b| *b != b'!'), 0..64)
    ) {
        let mut parser = PacketParser::new();
        let mut bytes = noise;
        bytes.extend_from_slice(&encode_button(Button::Left, true));
        let results = feed_all(&mut parser, &bytes);
        prop_assert_eq!(
            results,
            vec![Ok(Packet::Button { button: Button::Left, pressed: true })]
        );
    }

    #[test]
    fn color_packets_decode(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let color = RGB8::new(r, g, b);
        let mut parser = PacketParser::new();
        prop_assert_eq!(feed_all(&mut parser, &encode_color(color)), vec![Ok(Packet::Color(color))]);
    }
}
