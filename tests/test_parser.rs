
use fixtures::*;

use flp::{DeserializationError, EventKind, FlpError, parse};
use pretty_assertions::assert_eq;

#[test]
fn parses_the_minimal_file() {
    ensure_env_logger_initialized();
    let file = parse(&minimal_file()).unwrap();
    assert!(file.events.is_empty());
    assert!(file.trailing().is_empty());
    assert_eq!(file.version(), "0.0.0");
    assert!(!file.use_unicode());
    assert_eq!(file.header().format, 0);
    assert_eq!(file.header().channel_count, 1);
    assert_eq!(file.header().ppq, 96);
}

#[test]
fn parses_a_byte_event() {
    let file = parse(&wrap_stream(&[0x05, 0x2A])).unwrap();
    assert_eq!(file.events.len(), 1);

    let event = &file.events[0];
    assert_eq!(event.id, 5);
    assert_eq!(event.kind, EventKind::U8);
    assert_eq!(event.framing(), &[0x05]);
    assert_eq!(event.payload(), &[0x2A]);
    assert_eq!(event.u8().unwrap(), 0x2A);
}

#[test]
fn parses_a_text_event() {
    let file = parse(&wrap_stream(&[0xC2, 0x03, 0x41, 0x42, 0x43])).unwrap();
    assert_eq!(file.events.len(), 1);

    let event = &file.events[0];
    assert_eq!(event.id, 194);
    assert_eq!(event.kind, EventKind::Text);
    assert_eq!(event.framing(), &[0xC2, 0x03]);
    assert_eq!(event.payload(), &[0x41, 0x42, 0x43]);
    assert_eq!(event.text(false).unwrap(), "ABC");
}

#[test]
fn parses_a_text_event_with_a_multi_byte_vli() {
    let payload = vec![0x41u8; 200];
    let stream = sized_event(0xC2, &payload);
    assert_eq!(&stream[..3], &[0xC2, 0xC8, 0x01]);

    let file = parse(&wrap_stream(&stream)).unwrap();
    let event = &file.events[0];
    assert_eq!(event.framing(), &[0xC2, 0xC8, 0x01]);
    assert_eq!(event.payload().len(), 200);
}

#[test]
fn splits_consecutive_events_of_every_fixed_range() {
    let mut stream = Vec::new();
    stream.extend_from_slice(&fixed_event(0, &[1]));
    stream.extend_from_slice(&fixed_event(66, &140u16.to_le_bytes()));
    stream.extend_from_slice(&fixed_event(128, &0x00FF_AA55u32.to_le_bytes()));
    stream.extend_from_slice(&sized_event(209, &[0xEE; 4]));

    let file = parse(&wrap_stream(&stream)).unwrap();
    assert_eq!(file.events.len(), 4);
    assert_eq!(file.events[0].kind, EventKind::U8);
    assert_eq!(file.events[1].u16().unwrap(), 140);
    assert_eq!(file.events[2].u32().unwrap(), 0x00FF_AA55);
    assert_eq!(file.events[3].kind, EventKind::Data);
}

#[test]
fn unknown_dword_with_an_implausible_size_reads_as_fixed() {
    // Uncatalogued id 140 followed by bytes whose VLI reading declares an
    // absurd size: the variable hypothesis is rejected outright.
    let stream = [140, 0xDE, 0xAD, 0xBE, 0xEF, 0x05, 0x2A];
    let file = parse(&wrap_stream(&stream)).unwrap();

    assert_eq!(file.events.len(), 2);
    let event = &file.events[0];
    assert_eq!(event.kind, EventKind::U32);
    assert_eq!(event.framing(), &[140]);
    assert_eq!(event.payload(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(file.events[1].id, 5);
}

#[test]
fn unknown_dword_followed_by_reachable_text_reads_as_variable() {
    // Uncatalogued id 141 with VLI size 8: only the variable reading lands
    // the walker on the TEXT event, so it wins by a clear margin.
    let mut stream = vec![141, 0x08];
    stream.extend_from_slice(&[0x41; 8]);
    stream.extend_from_slice(&sized_event(0xC2, &[0x41, 0x42, 0x43]));

    let file = parse(&wrap_stream(&stream)).unwrap();
    assert_eq!(file.events.len(), 2);

    let event = &file.events[0];
    assert_eq!(event.id, 141);
    assert_eq!(event.kind, EventKind::Unknown);
    assert_eq!(event.framing(), &[141, 0x08]);
    assert_eq!(event.payload(), &[0x41; 8]);

    assert_eq!(file.events[1].text(false).unwrap(), "ABC");
}

#[test]
fn unknown_dword_with_vli_size_three_prefers_fixed() {
    // Both readings consume the same five bytes; the range default wins.
    let stream = [140, 0x03, 0x11, 0x22, 0x33];
    let file = parse(&wrap_stream(&stream)).unwrap();

    assert_eq!(file.events.len(), 1);
    let event = &file.events[0];
    assert_eq!(event.kind, EventKind::U32);
    assert_eq!(event.payload(), &[0x03, 0x11, 0x22, 0x33]);
}

#[test]
fn unknown_dword_tie_goes_to_fixed() {
    // The variable reading survives its sanity checks but scores no better
    // than the fixed one, so the margin keeps the range default.
    let stream = [141, 0x02, 0xAA, 0xBB, 0x01, 0x2A, 0x00];
    let file = parse(&wrap_stream(&stream)).unwrap();

    assert_eq!(file.events.len(), 2);
    assert_eq!(file.events[0].kind, EventKind::U32);
    assert_eq!(file.events[0].payload(), &[0x02, 0xAA, 0xBB, 0x01]);
    assert_eq!(file.events[1].id, 0x2A);
}

#[test]
fn catalogued_dword_ids_never_disambiguate() {
    // PluginColor (128) is catalogued: even though its payload here would
    // also read as a plausible VLI-sized event, it stays fixed.
    let mut stream = vec![128, 0x02, 0x41, 0x42, 0x99];
    stream.extend_from_slice(&sized_event(0xC2, b"xyz"));
    let file = parse(&wrap_stream(&stream)).unwrap();

    assert_eq!(file.events[0].kind, EventKind::U32);
    assert_eq!(file.events[0].payload().len(), 4);
}

#[test]
fn detects_the_version_and_unicode_gate() {
    for (version, unicode) in [
        ("10.0.9", false),
        ("11.4.9", false),
        ("11.5", true),
        ("12.0", true),
        ("21.0.3", true),
    ] {
        let file = parse(&wrap_stream(&version_event(version))).unwrap();
        assert_eq!(file.version(), version, "version {version}");
        assert_eq!(file.use_unicode(), unicode, "version {version}");
    }
}

#[test]
fn a_malformed_version_string_never_enables_unicode() {
    // The first version event does not match the dotted-number shape; a
    // later, valid-looking one must not be consulted.
    let mut stream = version_event("12.0 beta");
    stream.extend_from_slice(&version_event("12.0"));

    let file = parse(&wrap_stream(&stream)).unwrap();
    assert_eq!(file.version(), "0.0.0");
    assert!(!file.use_unicode());
}

#[test]
fn only_the_first_version_event_counts() {
    let mut stream = version_event("11.4");
    stream.extend_from_slice(&version_event("21.0"));

    let file = parse(&wrap_stream(&stream)).unwrap();
    assert_eq!(file.version(), "11.4");
    assert!(!file.use_unicode());
}

#[test]
fn rejects_a_bad_outer_magic() {
    let mut buf = minimal_file();
    buf[0] = b'X';
    assert!(matches!(
        parse(&buf),
        Err(FlpError::BadMagic {
            chunk: "header",
            ..
        })
    ));
}

#[test]
fn rejects_a_bad_inner_magic() {
    let mut buf = minimal_file();
    buf[14..18].copy_from_slice(b"FLxx");
    assert!(matches!(
        parse(&buf),
        Err(FlpError::BadMagic { chunk: "data", .. })
    ));
}

#[test]
fn rejects_a_bad_header_size() {
    let mut buf = minimal_file();
    buf[4..8].copy_from_slice(&5u32.to_le_bytes());
    assert!(matches!(parse(&buf), Err(FlpError::BadHeaderSize { length: 5 })));
}

#[test]
fn rejects_an_out_of_range_format() {
    let mut buf = minimal_file();
    buf[8..10].copy_from_slice(&0x51i16.to_le_bytes());
    assert!(matches!(parse(&buf), Err(FlpError::BadFormat { format: 0x51 })));
}

#[test]
fn rejects_a_short_file() {
    let mut buf = wrap_stream(&[0x05, 0x2A]);
    buf[18..22].copy_from_slice(&100u32.to_le_bytes());
    assert!(matches!(
        parse(&buf),
        Err(FlpError::LengthMismatch {
            declared: 100,
            actual: 24,
        })
    ));
}

#[test]
fn preserves_bytes_past_the_declared_event_data() {
    let mut buf = wrap_stream(&[0x05, 0x2A]);
    buf.extend_from_slice(&[0xCA, 0xFE]);

    let file = parse(&buf).unwrap();
    assert_eq!(file.events.len(), 1);
    assert_eq!(file.trailing(), &[0xCA, 0xFE]);
}

#[test]
fn rejects_a_truncated_event_payload() {
    let err = parse(&wrap_stream(&[0xC2, 0x05, 0x41])).unwrap_err();
    assert!(matches!(
        err,
        FlpError::Deserialization(DeserializationError::TruncatedEvent {
            id: 0xC2,
            offset: 0,
            size: 5,
            have: 1,
        })
    ));
}

#[test]
fn rejects_a_vli_running_past_the_stream() {
    let err = parse(&wrap_stream(&[0xC2, 0x80])).unwrap_err();
    assert!(matches!(
        err,
        FlpError::Deserialization(DeserializationError::MalformedVli { offset: 1 })
    ));
}

#[test]
fn rejects_a_truncated_container() {
    let buf = &minimal_file()[..10];
    assert!(matches!(
        parse(buf),
        Err(FlpError::Deserialization(DeserializationError::EndOfBuffer { .. }))
    ));
}

#[test]
fn fixed_range_events_keep_their_exact_source_bytes() {
    let file = parse(&sample_project()).unwrap();
    for event in &file.events {
        if event.id < 192 && event.kind != EventKind::Unknown {
            let expected = 1 + match event.id {
                0..=63 => 1,
                64..=127 => 2,
                _ => 4,
            };
            assert_eq!(event.serialized_len(), expected, "event {}", event.id);
        }
    }
}
